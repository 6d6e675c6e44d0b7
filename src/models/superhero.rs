use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use validator::Validate;

/// A stored superhero record. `name` is the primary key.
///
/// Length limits mirror the `superhero` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct Superhero {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub power: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

impl Superhero {
    /// Builds a new record stamped with the current UTC time.
    pub fn new(name: impl Into<String>, power: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            power: power.into(),
            created: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constant::{MAX_NAME_LEN, MAX_POWER_LEN};

    #[test]
    fn new_record_is_stamped_now() {
        let before = OffsetDateTime::now_utc();
        let hero = Superhero::new("Captain Ember", "Pyrokinesis");
        let after = OffsetDateTime::now_utc();

        assert!(hero.created >= before && hero.created <= after);
        assert!(hero.validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_fields() {
        assert!(Superhero::new("", "Flight").validate().is_err());
        assert!(Superhero::new("Nova", "").validate().is_err());
        assert!(Superhero::new("x".repeat(MAX_NAME_LEN + 1), "Flight")
            .validate()
            .is_err());
        assert!(Superhero::new("Nova", "y".repeat(MAX_POWER_LEN + 1))
            .validate()
            .is_err());
        assert!(Superhero::new("x".repeat(MAX_NAME_LEN), "y".repeat(MAX_POWER_LEN))
            .validate()
            .is_ok());
    }

    #[test]
    fn serializes_created_as_rfc3339() {
        let hero = Superhero {
            name: "Nova".to_string(),
            power: "Flight".to_string(),
            created: time::macros::datetime!(2019-06-01 12:30:00 UTC),
        };

        let json = serde_json::to_value(&hero).unwrap();
        assert_eq!(json["name"], "Nova");
        assert_eq!(json["power"], "Flight");
        assert_eq!(json["created"], "2019-06-01T12:30:00Z");
    }
}
