//! Table-backed types.
//!
//! ```ignore
//! struct UserProfile;
//! impl Model for UserProfile {}
//!
//! assert_eq!(UserProfile::table_name(), "user_profile");
//! let sql = UserProfile::query().to_sql().get()?; // SELECT * FROM user_profile
//!
//! // `model.table_case = "kebab"` in the config file
//! let config = Config::load("fluentql.toml")?;
//! let sql = UserProfile::query_with(&config)?.to_sql().get()?; // SELECT * FROM user-profile
//! ```

use crate::config::{Config, TableCase};
use crate::error::SqlResult;
use crate::query::{Query, table};

/// A type stored in a table named after it.
pub trait Model {
    /// Table name; defaults to the type name in snake case.
    fn table_name() -> String {
        Self::table_name_with(TableCase::Snake)
    }

    /// The type name converted with `case`.
    fn table_name_with(case: TableCase) -> String {
        case.apply(type_base_name::<Self>())
    }

    /// A query against [`Model::table_name`].
    fn query() -> Query {
        table(Self::table_name())
    }

    /// A query against the table named with `config`'s `model.table_case`.
    ///
    /// Types that override [`Model::table_name`] usually override this too.
    fn query_with(config: &Config) -> SqlResult<Query> {
        Ok(table(Self::table_name_with(config.table_case()?)))
    }
}

/// Last path segment of the type name, generics stripped.
fn type_base_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let full = full.split('<').next().unwrap_or(full);
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserProfile;
    impl Model for UserProfile {}

    struct LegacyAccount;
    impl Model for LegacyAccount {
        fn table_name() -> String {
            "tbl_accounts".to_string()
        }
    }

    #[allow(dead_code)]
    struct Wrapper<T>(T);
    impl<T> Model for Wrapper<T> {}

    #[test]
    fn test_table_name_cases() {
        assert_eq!(UserProfile::table_name(), "user_profile");
        assert_eq!(UserProfile::table_name_with(TableCase::Camel), "userProfile");
        assert_eq!(UserProfile::table_name_with(TableCase::Pascal), "UserProfile");
        assert_eq!(UserProfile::table_name_with(TableCase::Kebab), "user-profile");
        assert_eq!(UserProfile::table_name_with(TableCase::Lower), "userprofile");
    }

    #[test]
    fn test_generic_type_name() {
        assert_eq!(Wrapper::<UserProfile>::table_name(), "wrapper");
    }

    #[test]
    fn test_query_uses_table_name() {
        assert_eq!(
            UserProfile::query().to_sql().get().unwrap(),
            "SELECT * FROM user_profile"
        );
        assert_eq!(
            LegacyAccount::query().to_sql().get().unwrap(),
            "SELECT * FROM tbl_accounts"
        );
    }

    #[test]
    fn test_query_with_config_case() {
        let config = Config::from_toml_str("[model]\ntable_case = \"kebab\"").unwrap();
        assert_eq!(
            UserProfile::query_with(&config).unwrap().to_sql().get().unwrap(),
            "SELECT * FROM user-profile"
        );
        assert_eq!(
            UserProfile::query_with(&Config::default())
                .unwrap()
                .table_name(),
            Some("user_profile")
        );

        let mut config = Config::default();
        config.set("model.table_case", "shouty");
        assert!(UserProfile::query_with(&config).is_err());
    }
}
