//! Concurrency property: at most one redemption per key.

use std::sync::Arc;

use studiolink_core::{CreatorId, PermissionTier};
use studiolink_registry::{RegistryError, StudioRegistry};

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn fifty_concurrent_redemptions_one_winner() {
    let registry = Arc::new(StudioRegistry::in_memory());
    let studio = registry
        .register_studio("Nova", "ops@nova.example", 0.2)
        .await
        .unwrap();
    let (key, secret) = registry
        .issue_key(studio.id, PermissionTier::Support, "contested", None)
        .await
        .unwrap();

    let secret = secret.expose().to_string();
    let mut handles = Vec::new();
    for _ in 0..50 {
        let registry = Arc::clone(&registry);
        let secret = secret.clone();
        let creator = CreatorId::new();
        handles.push(tokio::spawn(async move {
            registry.redeem(&secret, creator).await
        }));
    }

    let mut successes = Vec::new();
    let mut already_redeemed = 0usize;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(rel) => successes.push(rel),
            Err(RegistryError::AlreadyRedeemed(id)) => {
                assert_eq!(id, key.id);
                already_redeemed = already_redeemed.saturating_add(1);
            },
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes.len(), 1, "exactly one redemption must win");
    assert_eq!(already_redeemed, 49);

    // The single relationship belongs to the winning creator.
    let winner = &successes[0];
    let stored = registry
        .relationship(winner.id)
        .await
        .unwrap()
        .expect("winning relationship must exist");
    assert_eq!(stored.creator_id, winner.creator_id);
    assert_eq!(
        registry
            .relationships_for_studio(studio.id)
            .await
            .unwrap()
            .len(),
        1,
        "losers must not leave partial relationships behind"
    );
}
