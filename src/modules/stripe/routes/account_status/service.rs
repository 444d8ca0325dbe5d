use super::types::{request, response};
use crate::{
    modules::stripe::{model::Account, utils::non_empty},
    types::Context,
};
use std::sync::Arc;

pub fn summarize(account: Account) -> response::AccountStatus {
    let requirements = account.requirements;

    response::AccountStatus {
        is_verified: account.charges_enabled && account.payouts_enabled,
        is_restricted: requirements.disabled_reason.is_some(),
        requires_info: !requirements.currently_due.is_empty(),
        pending_requirements: requirements.currently_due,
        current_deadline: requirements.current_deadline,
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let account_id = non_empty(payload.body.account_id).ok_or(response::Error::MissingAccountId)?;

    let account = ctx
        .payment
        .provider
        .retrieve_account(&account_id)
        .await
        .map_err(|err| {
            tracing::error!("Error checking Stripe status for {}: {}", account_id, err);
            response::Error::FailedToRetrieveAccount(err.message())
        })?;

    Ok(response::Success::Status(summarize(account)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::stripe::{
        client::{fake::FakeProvider, Error as ProviderError},
        model::AccountRequirements,
    };
    use crate::types::test_support::context_with;

    #[test]
    fn verified_account_needs_charges_and_payouts() {
        let status = summarize(Account {
            id: String::from("acct_1"),
            charges_enabled: true,
            payouts_enabled: true,
            requirements: AccountRequirements::default(),
        });

        assert_eq!(
            status,
            response::AccountStatus {
                is_verified: true,
                is_restricted: false,
                requires_info: false,
                pending_requirements: vec![],
                current_deadline: None,
            }
        );
    }

    #[test]
    fn pending_requirements_are_reported() {
        let status = summarize(Account {
            id: String::from("acct_1"),
            charges_enabled: true,
            payouts_enabled: false,
            requirements: AccountRequirements {
                currently_due: vec![String::from("individual.verification.document")],
                disabled_reason: Some(String::from("requirements.past_due")),
                current_deadline: Some(1_700_000_000),
            },
        });

        assert!(!status.is_verified);
        assert!(status.is_restricted);
        assert!(status.requires_info);
        assert_eq!(status.current_deadline, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn missing_account_id_is_rejected_locally() {
        let provider = Arc::new(FakeProvider::default());
        let ctx = context_with(provider.clone());

        let res = service(
            ctx,
            request::Payload {
                body: request::Body {
                    account_id: Some(String::new()),
                },
            },
        )
        .await;

        assert_eq!(res.err(), Some(response::Error::MissingAccountId));
        assert!(provider.retrieved_accounts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_maps_to_error() {
        let provider = Arc::new(FakeProvider::returning_account(Err(
            ProviderError::RejectedByProvider {
                status: 404,
                message: Some(String::from("No such account: 'acct_missing'")),
            },
        )));
        let ctx = context_with(provider.clone());

        let res = service(
            ctx,
            request::Payload {
                body: request::Body {
                    account_id: Some(String::from("acct_missing")),
                },
            },
        )
        .await;

        assert_eq!(
            res.err(),
            Some(response::Error::FailedToRetrieveAccount(Some(String::from(
                "No such account: 'acct_missing'"
            ))))
        );
        assert_eq!(
            *provider.retrieved_accounts.lock().unwrap(),
            vec![String::from("acct_missing")]
        );
    }
}
