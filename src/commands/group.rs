use crate::args::{CreateGroupArgs, GroupRefArgs};
use crate::commands::{checked, load_ledger, show_money, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Group, GroupId};
use crate::store::GroupStore;
use crate::{Config, Result};
use anyhow::anyhow;
use std::fmt::Write;

/// Creates an empty group in the config's currency.
pub async fn group_create(config: Config, args: &CreateGroupArgs) -> Result<Out<Group>> {
    let store = config.store();
    let id = GroupId::new(args.id());
    if store.exists(&id).await.pub_result(ErrorType::Store)? {
        return Err(anyhow!("Group '{id}' already exists")).pub_result(ErrorType::Reference);
    }
    let group = Group::new(id, args.name(), config.currency().clone());
    store.save(&group).await.pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!("Created group '{}' ({})", group.id(), group.name()),
        group,
    ))
}

/// Shows a group's members, expenses and balances.
pub async fn group_show(config: Config, args: &GroupRefArgs) -> Result<Out<Group>> {
    let ledger = load_ledger(&config, args.group()).await?;
    let balances = checked(ledger.balances())?;
    let group = ledger.group();
    let currency = group.currency();

    let mut message = format!("Group '{}' ({})", group.id(), group.name());
    let _ = write!(message, "\nMembers:");
    for member in group.members() {
        let balance = balances.get(member.id()).unwrap_or_default();
        let _ = write!(
            message,
            "\n  {} ({}) {}",
            member.display_name(),
            member.id(),
            show_money(currency, balance)
        );
    }
    let _ = write!(message, "\nExpenses: {}", group.expenses().len());
    Ok(Out::new(message, ledger.into_group()))
}

/// Lists the ids of every group.
pub async fn group_list(config: Config) -> Result<Out<Vec<GroupId>>> {
    let ids = config.store().list().await.pub_result(ErrorType::Store)?;
    let message = if ids.is_empty() {
        String::from("There are no groups")
    } else {
        ids.iter()
            .map(GroupId::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Out::new(message, ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_group_create_and_list() {
        let env = TestEnv::new().await;
        group_create(env.config(), &CreateGroupArgs::new("trip", None))
            .await
            .unwrap();
        let out = group_create(
            env.config(),
            &CreateGroupArgs::new("rent", Some(String::from("Flat rent"))),
        )
        .await
        .unwrap();
        assert_eq!(out.structure().unwrap().name(), "Flat rent");

        let out = group_list(env.config()).await.unwrap();
        assert_eq!(
            out.structure().unwrap(),
            &vec![GroupId::new("rent"), GroupId::new("trip")]
        );
    }

    #[tokio::test]
    async fn test_group_create_twice() {
        let env = TestEnv::new().await;
        let args = CreateGroupArgs::new("trip", None);
        group_create(env.config(), &args).await.unwrap();
        let err = group_create(env.config(), &args).await.unwrap_err();
        assert_eq!(err.downcast_ref::<ErrorType>(), Some(&ErrorType::Reference));
    }

    #[tokio::test]
    async fn test_group_show_missing() {
        let env = TestEnv::new().await;
        let err = group_show(env.config(), &GroupRefArgs::new("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ErrorType>(), Some(&ErrorType::Reference));
    }

    #[tokio::test]
    async fn test_group_list_empty() {
        let env = TestEnv::new().await;
        let out = group_list(env.config()).await.unwrap();
        assert_eq!(out.message(), "There are no groups");
    }
}
