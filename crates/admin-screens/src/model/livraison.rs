use chrono::NaiveDate;
use resource_controller::{FieldErrors, Resource, Value};
use serde::{Deserialize, Serialize};

/// A supplier delivery (purchase), identified by a `LIV###` code.
///
/// Amounts are kept as the decimal strings the backend exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Livraison {
    pub id_livraison: String,
    #[serde(flatten)]
    pub details: LivraisonInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivraisonInput {
    pub frais_divers: String,
    #[serde(rename = "Periode_achat")]
    pub periode_achat: NaiveDate,
    pub prix_achat: String,
    #[serde(rename = "Prix_de_revient")]
    pub prix_de_revient: String,
    #[serde(rename = "Prix_de_vente")]
    pub prix_de_vente: String,
    #[serde(rename = "Id_partenaire")]
    pub id_partenaire: String,
}

/// A delivery partner, offered as reference data by the deliveries screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partenaire {
    pub id: String,
    pub nom_partenaire: String,
}

impl Resource for Livraison {
    type Id = String;
    type Input = LivraisonInput;
    const NAME: &'static str = "livraison";

    fn id(&self) -> &String {
        &self.id_livraison
    }

    fn from_input(id: String, input: LivraisonInput) -> Self {
        Self {
            id_livraison: id,
            details: input,
        }
    }

    fn apply_input(&mut self, input: LivraisonInput) {
        self.details = input;
    }

    fn validate(input: &LivraisonInput) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let amounts = [
            ("frais_divers", &input.frais_divers),
            ("prix_achat", &input.prix_achat),
            ("Prix_de_revient", &input.prix_de_revient),
            ("Prix_de_vente", &input.prix_de_vente),
        ];
        for (field, amount) in amounts {
            if amount.trim().parse::<f64>().is_err() {
                errors.insert(field.into(), vec!["montant invalide".into()]);
            }
        }
        if input.id_partenaire.trim().is_empty() {
            errors.insert("Id_partenaire".into(), vec!["le partenaire est requis".into()]);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.id_livraison.as_str(), self.details.id_partenaire.as_str()]
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id_livraison.as_str().into()),
            "partenaire" => Some(self.details.id_partenaire.as_str().into()),
            "periode_achat" => Some(self.details.periode_achat.to_string().into()),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.details.periode_achat)
    }

    fn category(&self) -> Option<String> {
        Some(self.details.id_partenaire.clone())
    }
}
