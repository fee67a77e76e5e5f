use chrono::NaiveDate;
use resource_controller::{FieldErrors, Resource, Value};
use serde::{Deserialize, Serialize};

/// A maintenance operation performed on a piece of equipment.
///
/// # Resource
/// Identifiers, sections and equipment references arrive as numbers or strings depending on
/// the record, so they are kept as [`Value`]s and compared without coercion.
///
/// See [`impl Resource for Maintenance`](#impl-Resource-for-Maintenance) for the filterable
/// fields (`section`, `type_maintenance`, `recurrence`) and the search subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id_maintenance: Value,
    #[serde(flatten)]
    pub details: MaintenanceInput,
}

/// Form payload for creating or editing a maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceInput {
    pub recurrence: String,
    pub type_maintenance: String,
    pub operations: String,
    pub recommandations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autre_intervenant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_intervenants: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_partenaire: Option<Value>,
    pub id_section: Value,
    pub id_exemplaire_produit: Value,
    pub date: NaiveDate,
}

const MAX_LABEL: usize = 50;

impl Resource for Maintenance {
    type Id = Value;
    type Input = MaintenanceInput;
    const NAME: &'static str = "maintenance";

    fn id(&self) -> &Value {
        &self.id_maintenance
    }

    fn from_input(id: Value, input: MaintenanceInput) -> Self {
        Self {
            id_maintenance: id,
            details: input,
        }
    }

    fn apply_input(&mut self, input: MaintenanceInput) {
        self.details = input;
    }

    fn validate(input: &MaintenanceInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut check = |field: &str, ok: bool, message: &str| {
            if !ok {
                errors
                    .entry(field.to_string())
                    .or_default()
                    .push(message.to_string());
            }
        };

        check("recurrence", !input.recurrence.trim().is_empty(), "la recurrence est requise");
        check("recurrence", input.recurrence.chars().count() <= MAX_LABEL, "50 caractères maximum");
        check("operations", !input.operations.trim().is_empty(), "les opérations sont requises");
        check(
            "type_maintenance",
            !input.type_maintenance.trim().is_empty(),
            "le type de maintenance est requis",
        );
        check(
            "type_maintenance",
            input.type_maintenance.chars().count() <= MAX_LABEL,
            "50 caractères maximum",
        );
        check(
            "autre_intervenant",
            input
                .autre_intervenant
                .as_ref()
                .map_or(true, |name| name.chars().count() <= MAX_LABEL),
            "50 caractères maximum",
        );
        check("id_section", is_present(&input.id_section), "la section est requise");
        check(
            "id_exemplaire_produit",
            is_present(&input.id_exemplaire_produit),
            "l'equipement est requis",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let d = &self.details;
        let mut fields = vec![
            d.operations.as_str(),
            d.recommandations.as_str(),
            d.recurrence.as_str(),
            d.type_maintenance.as_str(),
        ];
        fields.extend(d.autre_intervenant.as_deref());
        fields
    }

    fn field(&self, key: &str) -> Option<Value> {
        let d = &self.details;
        match key {
            "id" => Some(self.id_maintenance.clone()),
            "section" => Some(d.id_section.clone()),
            "type_maintenance" => Some(d.type_maintenance.as_str().into()),
            "recurrence" => Some(d.recurrence.as_str().into()),
            "date" => Some(d.date.to_string().into()),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.details.date)
    }

    fn category(&self) -> Option<String> {
        Some(self.details.type_maintenance.clone())
    }
}

/// A required reference: non-empty text or a positive number.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Number(n) => *n >= 1,
        Value::Text(text) => !text.trim().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MaintenanceInput {
        MaintenanceInput {
            recurrence: "mensuelle".into(),
            type_maintenance: "preventive".into(),
            operations: "Graissage".into(),
            recommandations: String::new(),
            autre_intervenant: None,
            id_intervenants: None,
            id_partenaire: None,
            id_section: "informatique".into(),
            id_exemplaire_produit: Value::Number(1),
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(Maintenance::validate(&input()).is_ok());
    }

    #[test]
    fn missing_fields_are_reported_per_field() {
        let mut bad = input();
        bad.recurrence = " ".into();
        bad.id_section = Value::Number(0);
        bad.id_exemplaire_produit = "".into();

        let errors = Maintenance::validate(&bad).unwrap_err();
        assert_eq!(errors["recurrence"], vec!["la recurrence est requise".to_string()]);
        assert!(errors.contains_key("id_section"));
        assert!(errors.contains_key("id_exemplaire_produit"));
        assert!(!errors.contains_key("operations"));
    }

    #[test]
    fn mixed_id_shapes_round_trip_through_json() {
        let json = r#"{
            "id_maintenance": 7,
            "recurrence": "bimensuelle",
            "type_maintenance": "préventive",
            "operations": "Contrôle visuel général",
            "recommandations": "Vérifier état des pneus",
            "id_section": 10,
            "id_exemplaire_produit": "808",
            "date": "2025-04-30"
        }"#;
        let record: Maintenance = serde_json::from_str(json).unwrap();
        assert_eq!(record.id_maintenance, Value::Number(7));
        assert_eq!(record.field("section"), Some(Value::Number(10)));
        assert_eq!(record.details.id_exemplaire_produit, Value::Text("808".into()));
        assert!(record.details.autre_intervenant.is_none());
    }
}
