use error_stack::{Result, ResultExt};
use thiserror::Error;

use super::password;
use crate::config::SeedPrincipal;
use crate::schema::NewPrincipal;
use crate::store::PrincipalStore;

#[derive(Debug, Error)]
#[error("Failed to provision seed principals")]
pub struct SeedError;

/// Creates every configured principal whose username is not taken
/// yet. Existing principals are left untouched. Returns how many
/// were created.
#[tracing::instrument(skip_all, fields(seeds = seeds.len()))]
pub async fn provision(
    store: &dyn PrincipalStore,
    seeds: &[SeedPrincipal],
) -> Result<usize, SeedError> {
    let mut created = 0;
    for seed in seeds {
        let exists = store
            .exists_by_username(&seed.username)
            .await
            .change_context(SeedError)?;

        if exists {
            tracing::debug!(username = %seed.username, "principal already exists, skipping");
            continue;
        }

        let password_hash = password::hash_blocking(seed.password.as_str().to_string())
            .await
            .change_context(SeedError)?;

        store
            .create(NewPrincipal {
                username: seed.username.clone(),
                password_hash: password_hash.into(),
                enabled: seed.enabled,
            })
            .await
            .change_context(SeedError)
            .attach_printable_lazy(|| format!("username = {:?}", seed.username))?;

        tracing::info!(username = %seed.username, "provisioned principal");
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPrincipalStore;
    use crate::types::Sensitive;

    fn seed(username: &str, enabled: bool) -> SeedPrincipal {
        SeedPrincipal {
            username: username.into(),
            password: Sensitive::new(username.into()),
            enabled,
        }
    }

    #[tokio::test]
    async fn test_provision_skips_existing() {
        let store = MemoryPrincipalStore::new();
        let seeds = [seed("admin", true), seed("user", true), seed("owt", false)];

        assert_eq!(provision(&store, &seeds).await.unwrap(), 3);
        assert_eq!(provision(&store, &seeds).await.unwrap(), 0);

        let owt = store.find_by_username("owt").await.unwrap().unwrap();
        assert!(!owt.enabled);
        assert!(password::verify(b"owt", owt.password_hash.as_str()).unwrap());
    }
}
