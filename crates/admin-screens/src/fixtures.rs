//! # Fixture Collections
//!
//! Seed records for the in-memory stores, one function per resource, plus the id generators
//! each store uses on create. Every call returns a fresh collection, so each test or system
//! instance starts from identical, isolated data.

use crate::model::{
    Disponibilite, Exemplaire, ExemplaireInput, Livraison, LivraisonInput, Maintenance,
    MaintenanceInput, MoyenDeTravail, Partenaire,
};
use chrono::{DateTime, NaiveDate, Utc};
use resource_controller::Value;

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap_or_default()
}

fn timestamp(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn maintenance(
    id: i64,
    recurrence: &str,
    type_maintenance: &str,
    operations: &str,
    recommandations: &str,
    autre_intervenant: Option<&str>,
    id_intervenants: Option<Value>,
    id_partenaire: Option<Value>,
    id_section: Value,
    id_exemplaire_produit: Value,
    on: &str,
) -> Maintenance {
    Maintenance {
        id_maintenance: Value::Number(id),
        details: MaintenanceInput {
            recurrence: recurrence.to_string(),
            type_maintenance: type_maintenance.to_string(),
            operations: operations.to_string(),
            recommandations: recommandations.to_string(),
            autre_intervenant: autre_intervenant.map(str::to_string),
            id_intervenants,
            id_partenaire,
            id_section,
            id_exemplaire_produit,
            date: date(on),
        },
    }
}

/// The ten maintenance records. Sections and references mix numbers and strings.
pub fn maintenances() -> Vec<Maintenance> {
    let text = |s: &str| Value::Text(s.to_string());
    vec![
        maintenance(
            154767,
            "mensuelle",
            "preventive",
            "Vérification des niveaux Vérification des niveaux Vérification des niveaux",
            "Ajouter liquide de frein",
            Some("Marie Lemoine"),
            Some(text("23")),
            Some(text("5")),
            text("informatique"),
            Value::Number(1),
            "2025-05-01",
        ),
        maintenance(
            2,
            "trimestrielle",
            "curative",
            "Remplacement courroie",
            "Faire contrôle complet",
            None,
            Some(Value::Number(12)),
            Some(text("8")),
            text("B3"),
            text("202"),
            "2025-04-15",
        ),
        maintenance(
            3,
            "annuelle",
            "préventive",
            "Nettoyage filtre à air",
            "À renouveler l'année prochaine",
            Some("Paul Martin"),
            None,
            None,
            text("C2"),
            Value::Number(305),
            "2025-01-10",
        ),
        maintenance(
            4,
            "mensuelle",
            "curative",
            "Remplacement de joint",
            "Surveiller consommation d'huile",
            None,
            Some(Value::Number(18)),
            None,
            text("D5"),
            Value::Number(410),
            "2025-05-10",
        ),
        maintenance(
            5,
            "hebdomadaire",
            "préventive",
            "Graissage",
            "RAS",
            None,
            Some(text("30")),
            Some(text("15")),
            text("Z9"),
            text("600"),
            "2025-05-05",
        ),
        maintenance(
            6,
            "ponctuelle",
            "curative",
            "Réparation fuite",
            "Réviser le circuit d'eau",
            Some("Technicien externe"),
            Some(Value::Number(27)),
            Some(text("9")),
            text("E3"),
            Value::Number(714),
            "2025-03-22",
        ),
        maintenance(
            7,
            "bimensuelle",
            "préventive",
            "Contrôle visuel général",
            "Vérifier état des pneus",
            None,
            None,
            None,
            Value::Number(10),
            text("808"),
            "2025-04-30",
        ),
        maintenance(
            8,
            "semestrielle",
            "curative",
            "Changement ampoule",
            "Prévoir ampoules en stock",
            Some("Lucas Pereira"),
            Some(text("21")),
            None,
            text("F4"),
            Value::Number(909),
            "2025-02-28",
        ),
        maintenance(
            9,
            "mensuelle",
            "préventive",
            "Calibration capteurs",
            "Revoir protocole d'étalonnage",
            None,
            None,
            Some(text("33")),
            text("H1"),
            Value::Number(1100),
            "2025-05-09",
        ),
        maintenance(
            10,
            "annuelle",
            "curative",
            "Révision complète moteur",
            "Remplacer courroie distribution",
            None,
            Some(text("40")),
            None,
            text("J7"),
            text("1205"),
            "2025-01-05",
        ),
    ]
}

/// Next numeric id: one past the largest numeric id in use.
pub fn next_maintenance_id(records: &[Maintenance]) -> Value {
    let max = records
        .iter()
        .filter_map(|r| r.id_maintenance.as_number())
        .max()
        .unwrap_or(0);
    Value::Number(max + 1)
}

fn moyen(id: i64, denomination: &str, acquired: &str, section: &str, stamp: &str) -> MoyenDeTravail {
    MoyenDeTravail {
        id_moyens_de_travail: id,
        denomination: denomination.to_string(),
        date_acquisition: date(acquired),
        section: section.to_string(),
        created_at: timestamp(stamp),
        updated_at: timestamp(stamp),
    }
}

pub fn moyens() -> Vec<MoyenDeTravail> {
    vec![
        moyen(1, "Ordinateur portable", "2023-08-15", "Informatique", "2023-08-15T10:30:00Z"),
        moyen(2, "Imprimante laser", "2022-05-10", "Bureau", "2022-05-10T09:00:00Z"),
        moyen(3, "Camionnette de service", "2021-11-01", "Logistique", "2021-11-01T08:45:00Z"),
        moyen(4, "Projecteur", "2020-02-20", "Formation", "2020-02-20T14:00:00Z"),
        moyen(5, "Scanner à plat", "2022-07-12", "Bureau", "2022-07-12T11:20:00Z"),
        moyen(6, "Tablette graphique", "2023-01-05", "Design", "2023-01-05T13:15:00Z"),
        moyen(7, "Appareil photo numérique", "2019-09-23", "Communication", "2019-09-23T10:00:00Z"),
        moyen(8, "Serveur NAS", "2022-11-30", "Informatique", "2022-11-30T16:45:00Z"),
        moyen(9, "Fauteuil ergonomique", "2021-04-18", "Ressources humaines", "2021-04-18T09:30:00Z"),
        moyen(10, "Routeur professionnel", "2023-06-01", "Réseaux", "2023-06-01T08:00:00Z"),
    ]
}

pub fn next_moyen_id(records: &[MoyenDeTravail]) -> i64 {
    records.iter().map(|r| r.id_moyens_de_travail).max().unwrap_or(0) + 1
}

fn exemplaire(id: &str, serial: &str, price: &str, etat: Disponibilite, livraison: Option<&str>) -> Exemplaire {
    Exemplaire {
        id_exemplaire: id.to_string(),
        details: ExemplaireInput {
            num_serie: serial.to_string(),
            prix_exemplaire: price.to_string(),
            etat,
            id_commande: None,
            id_livraison: livraison.map(str::to_string),
            id_produit: "PRD001".to_string(),
            code_produit: "CP123456".to_string(),
        },
    }
}

pub fn exemplaires() -> Vec<Exemplaire> {
    vec![
        exemplaire("EX001", "SN12345678", "499.99", Disponibilite::Disponible, None),
        exemplaire("EX002", "SN23456789", "499.99", Disponibilite::Disponible, Some("LIV001")),
        exemplaire("EX004", "SN45678901", "479.00", Disponibilite::Indisponible, Some("LIV002")),
    ]
}

/// First free `EX###` code, so gaps left by deletions are reused.
pub fn next_exemplaire_id(records: &[Exemplaire]) -> String {
    (1..)
        .map(|n| format!("EX{n:03}"))
        .find(|code| records.iter().all(|r| &r.id_exemplaire != code))
        .unwrap_or_default()
}

fn livraison(id: &str, frais: &str, periode: &str, achat: &str, revient: &str, vente: &str, partenaire: &str) -> Livraison {
    Livraison {
        id_livraison: id.to_string(),
        details: LivraisonInput {
            frais_divers: frais.to_string(),
            periode_achat: date(periode),
            prix_achat: achat.to_string(),
            prix_de_revient: revient.to_string(),
            prix_de_vente: vente.to_string(),
            id_partenaire: partenaire.to_string(),
        },
    }
}

pub fn livraisons() -> Vec<Livraison> {
    vec![
        livraison("LIV001", "200", "2025-04-01", "5000", "5200", "6000", "P001"),
        livraison("LIV002", "150", "2025-04-05", "3500", "3650", "4500", "P002"),
    ]
}

/// `LIV` followed by the last record's number plus one, zero-padded to three digits.
pub fn next_livraison_id(records: &[Livraison]) -> String {
    let last = records
        .last()
        .and_then(|r| r.id_livraison.trim_start_matches("LIV").parse::<u32>().ok())
        .unwrap_or(0);
    format!("LIV{:03}", last + 1)
}

pub fn partenaires() -> Vec<Partenaire> {
    [
        ("P001", "Express Logistics"),
        ("P002", "Rapid Delivery"),
        ("P003", "Global Transport"),
        ("P004", "City Courier"),
    ]
    .into_iter()
    .map(|(id, name)| Partenaire {
        id: id.to_string(),
        nom_partenaire: name.to_string(),
    })
    .collect()
}
