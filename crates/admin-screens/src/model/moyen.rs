use chrono::{DateTime, NaiveDate, Utc};
use resource_controller::{FieldErrors, Resource, Value};
use serde::{Deserialize, Serialize};

/// A piece of working equipment ("moyen de travail") assigned to a section.
///
/// `created_at` and `updated_at` are server-assigned and absent from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoyenDeTravail {
    pub id_moyens_de_travail: i64,
    pub denomination: String,
    pub date_acquisition: NaiveDate,
    pub section: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoyenDeTravailInput {
    pub denomination: String,
    pub date_acquisition: NaiveDate,
    pub section: String,
}

impl Resource for MoyenDeTravail {
    type Id = i64;
    type Input = MoyenDeTravailInput;
    const NAME: &'static str = "moyens-de-travail";

    fn id(&self) -> &i64 {
        &self.id_moyens_de_travail
    }

    fn from_input(id: i64, input: MoyenDeTravailInput) -> Self {
        let now = Utc::now();
        Self {
            id_moyens_de_travail: id,
            denomination: input.denomination,
            date_acquisition: input.date_acquisition,
            section: input.section,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_input(&mut self, input: MoyenDeTravailInput) {
        self.denomination = input.denomination;
        self.date_acquisition = input.date_acquisition;
        self.section = input.section;
        self.updated_at = Utc::now();
    }

    fn validate(input: &MoyenDeTravailInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if input.denomination.trim().is_empty() {
            errors.insert("denomination".into(), vec!["la dénomination est requise".into()]);
        }
        if input.section.trim().is_empty() {
            errors.insert("section".into(), vec!["la section est requise".into()]);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.denomination.as_str(), self.section.as_str()]
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id_moyens_de_travail.into()),
            "section" => Some(self.section.as_str().into()),
            "denomination" => Some(self.denomination.as_str().into()),
            "date_acquisition" => Some(self.date_acquisition.to_string().into()),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date_acquisition)
    }

    fn category(&self) -> Option<String> {
        Some(self.section.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_id_and_creation_time() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 15).unwrap();
        let mut moyen = MoyenDeTravail::from_input(
            1,
            MoyenDeTravailInput {
                denomination: "Ordinateur portable".into(),
                date_acquisition: date,
                section: "Informatique".into(),
            },
        );
        let created_at = moyen.created_at;

        moyen.apply_input(MoyenDeTravailInput {
            denomination: "Ordinateur fixe".into(),
            date_acquisition: date,
            section: "Bureau".into(),
        });

        assert_eq!(moyen.id_moyens_de_travail, 1);
        assert_eq!(moyen.created_at, created_at);
        assert!(moyen.updated_at >= created_at);
        assert_eq!(moyen.category().as_deref(), Some("Bureau"));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let input = MoyenDeTravailInput {
            denomination: "".into(),
            date_acquisition: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            section: " ".into(),
        };
        let errors = MoyenDeTravail::validate(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
