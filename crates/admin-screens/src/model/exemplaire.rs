use resource_controller::{FieldErrors, Resource, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock availability of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disponibilite {
    Disponible,
    Indisponible,
}

impl Disponibilite {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disponible => "disponible",
            Self::Indisponible => "indisponible",
        }
    }
}

impl fmt::Display for Disponibilite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical copy of a stocked product, identified by an `EX###` code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemplaire {
    pub id_exemplaire: String,
    #[serde(flatten)]
    pub details: ExemplaireInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExemplaireInput {
    pub num_serie: String,
    pub prix_exemplaire: String,
    #[serde(rename = "etat_disponible_indisponible_")]
    pub etat: Disponibilite,
    #[serde(rename = "Id_Commande")]
    pub id_commande: Option<String>,
    pub id_livraison: Option<String>,
    pub id_produit: String,
    #[serde(rename = "Code_produit")]
    pub code_produit: String,
}

const MIN_SERIAL: usize = 6;

impl Resource for Exemplaire {
    type Id = String;
    type Input = ExemplaireInput;
    const NAME: &'static str = "exemplaire";

    fn id(&self) -> &String {
        &self.id_exemplaire
    }

    fn from_input(id: String, input: ExemplaireInput) -> Self {
        Self {
            id_exemplaire: id,
            details: input,
        }
    }

    fn apply_input(&mut self, input: ExemplaireInput) {
        self.details = input;
    }

    fn validate(input: &ExemplaireInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if input.num_serie.trim().chars().count() < MIN_SERIAL {
            errors.insert(
                "num_serie".into(),
                vec!["Le numéro de série doit avoir au moins 6 caractères".into()],
            );
        }
        if input.prix_exemplaire.trim().is_empty() {
            errors.insert("prix_exemplaire".into(), vec!["Le prix est requis".into()]);
        } else if input.prix_exemplaire.trim().parse::<f64>().is_err() {
            errors.insert("prix_exemplaire".into(), vec!["Le prix doit être un nombre".into()]);
        }
        if input.id_produit.trim().is_empty() {
            errors.insert("id_produit".into(), vec!["Un produit doit être sélectionné".into()]);
        }
        if input.code_produit.trim().is_empty() {
            errors.insert("Code_produit".into(), vec!["Le code produit est requis".into()]);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.details.num_serie.as_str(), self.id_exemplaire.as_str()]
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id_exemplaire.as_str().into()),
            "status" => Some(self.details.etat.as_str().into()),
            "id_produit" => Some(self.details.id_produit.as_str().into()),
            "id_livraison" => self.details.id_livraison.as_deref().map(Value::from),
            _ => None,
        }
    }

    fn category(&self) -> Option<String> {
        Some(self.details.etat.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(serial: &str, price: &str) -> ExemplaireInput {
        ExemplaireInput {
            num_serie: serial.into(),
            prix_exemplaire: price.into(),
            etat: Disponibilite::Disponible,
            id_commande: None,
            id_livraison: None,
            id_produit: "PRD001".into(),
            code_produit: "CP123456".into(),
        }
    }

    #[test]
    fn serial_and_price_are_checked() {
        assert!(Exemplaire::validate(&input("SN12345678", "499.99")).is_ok());

        let errors = Exemplaire::validate(&input("SN1", "abc")).unwrap_err();
        assert!(errors.contains_key("num_serie"));
        assert_eq!(errors["prix_exemplaire"], vec!["Le prix doit être un nombre".to_string()]);
    }

    #[test]
    fn wire_names_follow_the_backend() {
        let exemplaire = Exemplaire::from_input("EX001".into(), input("SN12345678", "499.99"));
        let json = serde_json::to_value(&exemplaire).unwrap();
        assert_eq!(json["id_exemplaire"], "EX001");
        assert_eq!(json["etat_disponible_indisponible_"], "disponible");
        assert_eq!(json["Code_produit"], "CP123456");
        assert!(json["Id_Commande"].is_null());
    }
}
