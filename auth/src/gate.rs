use crate::identity::IdentityError;
use crate::identity::IdentityResolver;
use crate::identity::PrincipalLookup;

/// Account state consulted by [`AccessGate::current_active_identity`].
///
/// Every principal is active unless the implementor says otherwise.
pub trait AccountStatus {
    fn is_active(&self) -> bool {
        true
    }
}

/// Endpoint-level "current user" contract.
///
/// Resource-specific rules such as ownership are left to the caller.
pub struct AccessGate<L> {
    resolver: IdentityResolver<L>,
}

impl<L: PrincipalLookup> AccessGate<L> {
    pub fn new(resolver: IdentityResolver<L>) -> Self {
        Self { resolver }
    }

    /// Principal behind a valid bearer token.
    pub async fn current_identity(
        &self,
        authorization: Option<&str>,
    ) -> Result<L::Principal, IdentityError<L::Error>> {
        self.resolver.resolve(authorization).await
    }
}

impl<L> AccessGate<L>
where
    L: PrincipalLookup,
    L::Principal: AccountStatus,
{
    /// Like [`current_identity`](Self::current_identity), also rejecting
    /// inactive principals.
    pub async fn current_active_identity(
        &self,
        authorization: Option<&str>,
    ) -> Result<L::Principal, IdentityError<L::Error>> {
        let principal = self.current_identity(authorization).await?;

        if !principal.is_active() {
            tracing::warn!(reason = "inactive", "Request rejected");
            return Err(IdentityError::Inactive);
        }

        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::jwt::Claims;
    use crate::jwt::TokenCodec;
    use crate::jwt::TokenSettings;

    #[derive(Debug, Clone)]
    struct Account {
        email: String,
        active: bool,
    }

    impl AccountStatus for Account {
        fn is_active(&self) -> bool {
            self.active
        }
    }

    struct Accounts(Vec<Account>);

    #[async_trait]
    impl PrincipalLookup for Accounts {
        type Principal = Account;
        type Error = std::io::Error;

        async fn find_by_subject(&self, subject: &str) -> Result<Option<Account>, std::io::Error> {
            Ok(self.0.iter().find(|a| a.email == subject).cloned())
        }
    }

    fn setup() -> (Arc<TokenCodec>, AccessGate<Accounts>) {
        let codec = Arc::new(
            TokenCodec::new(&TokenSettings::new("test_secret_key_at_least_32_bytes!")).unwrap(),
        );
        let accounts = Accounts(vec![
            Account {
                email: "active@example.com".to_string(),
                active: true,
            },
            Account {
                email: "banned@example.com".to_string(),
                active: false,
            },
        ]);
        let gate = AccessGate::new(IdentityResolver::new(codec.clone(), Arc::new(accounts)));

        (codec, gate)
    }

    fn bearer(codec: &TokenCodec, subject: &str) -> String {
        format!(
            "Bearer {}",
            codec.issue(Claims::for_subject(subject), None).unwrap()
        )
    }

    #[tokio::test]
    async fn test_current_identity_ignores_account_status() {
        let (codec, gate) = setup();

        let account = gate
            .current_identity(Some(bearer(&codec, "banned@example.com").as_str()))
            .await
            .unwrap();

        assert_eq!(account.email, "banned@example.com");
    }

    #[tokio::test]
    async fn test_current_active_identity_accepts_active_account() {
        let (codec, gate) = setup();

        let account = gate
            .current_active_identity(Some(bearer(&codec, "active@example.com").as_str()))
            .await
            .unwrap();

        assert_eq!(account.email, "active@example.com");
    }

    #[tokio::test]
    async fn test_current_active_identity_rejects_inactive_account() {
        let (codec, gate) = setup();

        let result = gate
            .current_active_identity(Some(bearer(&codec, "banned@example.com").as_str()))
            .await;

        assert!(matches!(result, Err(IdentityError::Inactive)));
    }

    #[tokio::test]
    async fn test_gate_requires_token() {
        let (_, gate) = setup();

        let result = gate.current_active_identity(None).await;

        assert!(matches!(result, Err(IdentityError::Unauthenticated)));
    }
}
