//! Translation lookup used by the catalog and display helpers.

use std::collections::HashMap;

/// Resolves a translation key to display text.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Static key/value table. Unknown keys resolve to the key itself.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: HashMap<&'static str, &'static str>,
}

const FRENCH: &[(&str, &str)] = &[
    ("services.menage.name", "Ménage à domicile"),
    (
        "services.menage.description",
        "Entretien complet de votre logement, pièce par pièce.",
    ),
    ("services.bureaux.name", "Nettoyage de bureaux"),
    (
        "services.bureaux.description",
        "Entretien régulier ou ponctuel de vos locaux professionnels.",
    ),
    ("services.matelas.name", "Nettoyage matelas"),
    (
        "services.matelas.description",
        "Désinfection et détachage de matelas à domicile.",
    ),
    ("services.canape.name", "Nettoyage canapé"),
    (
        "services.canape.description",
        "Shampooing et détachage de canapés en tissu.",
    ),
    ("services.sols.name", "Traitement des sols"),
    (
        "services.sols.description",
        "Décapage, cristallisation et protection de vos sols.",
    ),
    ("services.tapis.name", "Nettoyage tapis"),
    (
        "services.tapis.description",
        "Nettoyage en profondeur de tapis et moquettes.",
    ),
    ("services.chantier.name", "Fin de chantier"),
    (
        "services.chantier.description",
        "Remise en état après travaux, en formule pack.",
    ),
    ("questions.numberOfRooms", "Nombre de pièces"),
    ("questions.hasDeepCleaning", "Nettoyage profond"),
    ("questions.hasWindowCleaning", "Nettoyage des vitres"),
    ("questions.surface", "Surface (m²)"),
    ("questions.frequency", "Fréquence"),
    ("questions.matressSize", "Taille du matelas (cm)"),
    ("questions.numberOfMatresses", "Nombre de matelas"),
    ("questions.numberOfSeats", "Nombre de places"),
    ("questions.surfaceType", "Type de sol"),
    ("questions.size", "Taille du tapis"),
    ("questions.pack", "Formule"),
    ("schedule.morning", "Matin (8h - 12h)"),
    ("schedule.afternoon", "Après-midi (13h - 18h)"),
    ("steps.address", "Adresse"),
    ("steps.service", "Service"),
    ("steps.subthemes", "Détails"),
    ("steps.schedule", "Créneau"),
    ("steps.contact", "Coordonnées"),
    (
        "notifications.new_reservation",
        "Nouvelle réservation de {client} : {service}",
    ),
];

impl Translations {
    /// Built-in French strings for the catalog, schedule and step labels.
    pub fn french() -> Self {
        Self {
            entries: FRENCH.iter().copied().collect(),
        }
    }

    pub fn with_entry(mut self, key: &'static str, value: &'static str) -> Self {
        self.entries.insert(key, value);
        self
    }
}

impl Translate for Translations {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .map(|value| (*value).to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
