use crate::commands::{close, open, Out, LOGIN_FIRST};
use crate::model::{Amount, Field};
use crate::{Config, Result};
use serde::Serialize;

/// The value a week ended up with after `tracker set`.
#[derive(Debug, Clone, Serialize)]
pub struct Edit {
    pub week: u32,
    pub field: Field,
    pub value: Amount,
}

/// Types `value` into one money field of `week`. The edit is kept in the session until it is
/// saved.
pub async fn set(config: Config, week: u32, field: Field, value: &str) -> Result<Out<Edit>> {
    let mut tracker = open(&config).await?;
    if tracker.identity().is_none() {
        return Ok(LOGIN_FIRST.into());
    }
    let out = if tracker.edit(week, field, value) {
        let value = tracker
            .state()
            .dataset()
            .get(week)
            .map(|r| r.get(field))
            .unwrap_or_default();
        Out::new(
            format!("Week {week} {field} set to {value}, run 'tracker save' to keep it"),
            Edit { week, field, value },
        )
    } else {
        format!("There is no week {week}").into()
    };
    close(&config, tracker).await?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::LoginArgs;
    use crate::commands::login;
    use crate::session;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_set_requires_login() {
        let env = TestEnv::new().await;
        let out = set(env.config(), 1, Field::Deposit, "10").await.unwrap();
        assert_eq!(out.message(), LOGIN_FIRST);
    }

    #[tokio::test]
    async fn test_set_is_kept_in_session() {
        let env = TestEnv::new().await;
        login(env.config(), LoginArgs::new(None, None, true))
            .await
            .unwrap();
        let out = set(env.config(), 4, Field::Out, "R 1,250.50").await.unwrap();
        assert_eq!(out.structure().unwrap().value.to_string(), "1250.50");

        let state = session::load(&env.config().session_path()).await.unwrap();
        assert!(state.is_dirty());
        assert_eq!(
            state.dataset().get(4).unwrap().out(),
            Amount::parse_lenient("1250.5")
        );
    }

    #[tokio::test]
    async fn test_set_unknown_week() {
        let env = TestEnv::new().await;
        login(env.config(), LoginArgs::new(None, None, true))
            .await
            .unwrap();
        crate::commands::save(env.config()).await.unwrap();
        let state = session::load(&env.config().session_path()).await.unwrap();
        assert!(state.notice.is_some());

        let out = set(env.config(), 99, Field::Out, "1").await.unwrap();
        assert_eq!(out.message(), "There is no week 99");
        assert!(out.structure().is_none());

        // The edit still clears the notice, and that is written back.
        let state = session::load(&env.config().session_path()).await.unwrap();
        assert!(state.notice.is_none());
        assert!(!state.is_dirty());
    }

    #[tokio::test]
    async fn test_set_huge_value_is_capped() {
        let env = TestEnv::new().await;
        login(env.config(), LoginArgs::new(None, None, true))
            .await
            .unwrap();
        let huge = "79228162514264337593543950335";
        set(env.config(), 1, Field::Deposit, huge).await.unwrap();
        let out = set(env.config(), 2, Field::Deposit, huge).await.unwrap();
        assert_eq!(out.structure().unwrap().value, Amount::MAX_ENTRY);
        let state = session::load(&env.config().session_path()).await.unwrap();
        let totals = crate::summary::Summary::new(state.dataset());
        assert_eq!(totals.year.deposit, Amount::MAX_ENTRY + Amount::MAX_ENTRY);
    }
}
