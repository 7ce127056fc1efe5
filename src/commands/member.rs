use crate::args::{AddMemberArgs, RemoveMemberArgs};
use crate::commands::{checked, load_ledger, save_ledger, Out};
use crate::model::{Member, MemberId};
use crate::{Config, Result};

/// Adds a member to a group.
pub async fn member_add(config: Config, args: &AddMemberArgs) -> Result<Out<Member>> {
    let mut ledger = load_ledger(&config, args.group()).await?;
    let member = Member::new(args.id(), args.name());
    checked(ledger.add_member(member.clone()))?;
    save_ledger(&config, &ledger).await?;
    Ok(Out::new(
        format!(
            "Added {} ({}) to group '{}'",
            member.display_name(),
            member.id(),
            args.group()
        ),
        member,
    ))
}

/// Removes a member who has no expense history from a group.
pub async fn member_remove(config: Config, args: &RemoveMemberArgs) -> Result<Out<Member>> {
    let mut ledger = load_ledger(&config, args.group()).await?;
    let member = checked(ledger.remove_member(&MemberId::new(args.id())))?;
    save_ledger(&config, &ledger).await?;
    Ok(Out::new(
        format!(
            "Removed {} ({}) from group '{}'",
            member.display_name(),
            member.id(),
            args.group()
        ),
        member,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{AddExpenseArgs, CreateGroupArgs, DraftArgs};
    use crate::commands::{expense_add, group_create};
    use crate::error::{ErrorType, LedgerError};
    use crate::model::Amount;
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    async fn trip(env: &TestEnv) {
        group_create(env.config(), &CreateGroupArgs::new("trip", None))
            .await
            .unwrap();
        for id in ["alice", "bob"] {
            member_add(env.config(), &AddMemberArgs::new("trip", id, None))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_member_add_and_remove() {
        let env = TestEnv::new().await;
        trip(&env).await;
        let out = member_add(
            env.config(),
            &AddMemberArgs::new("trip", "charlie", Some(String::from("Charlie"))),
        )
        .await
        .unwrap();
        assert_eq!(out.structure().unwrap().display_name(), "Charlie");

        let out = member_remove(env.config(), &RemoveMemberArgs::new("trip", "charlie"))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().id(), &MemberId::new("charlie"));
    }

    #[tokio::test]
    async fn test_member_add_duplicate() {
        let env = TestEnv::new().await;
        trip(&env).await;
        let err = member_add(env.config(), &AddMemberArgs::new("trip", "bob", None))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ErrorType>(), Some(&ErrorType::Reference));
        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::DuplicateMember(MemberId::new("bob")))
        );
    }

    #[tokio::test]
    async fn test_member_remove_payer_is_rejected() {
        let env = TestEnv::new().await;
        trip(&env).await;
        let draft = DraftArgs::new(
            "Taxi",
            Amount::from_str("20").unwrap(),
            "alice",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            Vec::new(),
        );
        expense_add(env.config(), &AddExpenseArgs::new("trip", draft))
            .await
            .unwrap();

        let err = member_remove(env.config(), &RemoveMemberArgs::new("trip", "alice"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::MemberHasHistory { .. })
        ));
    }
}
