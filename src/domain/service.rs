//! Service catalog and the follow-up questions each service asks.

use serde::{Deserialize, Serialize};

use crate::domain::common::NamedEntity;
use crate::domain::i18n::Translate;
use crate::errors::{ReservationError, Result};

/// Kind of answer a sub-theme question expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Number,
    Flag,
    Choice(Vec<String>),
}

/// Service-specific follow-up question asked in the sub-themes step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubThemeQuestion {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub kind: QuestionKind,
}

/// An offerable service. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub questions: Vec<SubThemeQuestion>,
}

impl Service {
    pub fn question(&self, id: &str) -> Option<&SubThemeQuestion> {
        self.questions.iter().find(|question| question.id == id)
    }

    /// Required questions in the order they are asked.
    pub fn required_questions(&self) -> impl Iterator<Item = &SubThemeQuestion> {
        self.questions.iter().filter(|question| question.required)
    }
}

impl NamedEntity for Service {
    fn name(&self) -> &str {
        &self.name
    }
}

struct QuestionSpec {
    id: &'static str,
    required: bool,
    kind: fn() -> QuestionKind,
}

struct ServiceSpec {
    id: &'static str,
    icon: &'static str,
    questions: &'static [QuestionSpec],
}

fn number() -> QuestionKind {
    QuestionKind::Number
}

fn flag() -> QuestionKind {
    QuestionKind::Flag
}

fn choices(options: &[&str]) -> QuestionKind {
    QuestionKind::Choice(options.iter().map(|option| (*option).to_string()).collect())
}

fn frequencies() -> QuestionKind {
    choices(&["weekly", "monthly", "once"])
}

fn mattress_sizes() -> QuestionKind {
    choices(&["90", "140", "160", "180"])
}

fn floor_types() -> QuestionKind {
    choices(&["Parquet", "Carrelage", "Marbre", "Moquette"])
}

fn rug_sizes() -> QuestionKind {
    choices(&["Petit", "Moyen", "Grand"])
}

fn packs() -> QuestionKind {
    choices(&["Essentiel", "Confort", "Premium"])
}

const CATALOG: &[ServiceSpec] = &[
    ServiceSpec {
        id: "menage",
        icon: "home",
        questions: &[
            QuestionSpec { id: "numberOfRooms", required: true, kind: number },
            QuestionSpec { id: "hasDeepCleaning", required: false, kind: flag },
            QuestionSpec { id: "hasWindowCleaning", required: false, kind: flag },
        ],
    },
    ServiceSpec {
        id: "bureaux",
        icon: "building",
        questions: &[
            QuestionSpec { id: "surface", required: true, kind: number },
            QuestionSpec {
                id: "frequency",
                required: true,
                kind: frequencies,
            },
        ],
    },
    ServiceSpec {
        id: "matelas",
        icon: "bed",
        questions: &[
            QuestionSpec {
                id: "matressSize",
                required: true,
                kind: mattress_sizes,
            },
            QuestionSpec { id: "numberOfMatresses", required: false, kind: number },
        ],
    },
    ServiceSpec {
        id: "canape",
        icon: "sofa",
        questions: &[QuestionSpec { id: "numberOfSeats", required: true, kind: number }],
    },
    ServiceSpec {
        id: "sols",
        icon: "layers",
        questions: &[QuestionSpec {
            id: "surfaceType",
            required: true,
            kind: floor_types,
        }],
    },
    ServiceSpec {
        id: "tapis",
        icon: "square",
        questions: &[QuestionSpec {
            id: "size",
            required: true,
            kind: rug_sizes,
        }],
    },
    ServiceSpec {
        id: "chantier",
        icon: "hammer",
        questions: &[QuestionSpec {
            id: "pack",
            required: true,
            kind: packs,
        }],
    },
];

/// The fixed list of services offered by the business.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    /// Builds the catalog, resolving every label through `translator`.
    pub fn new(translator: &dyn Translate) -> Self {
        let services = CATALOG
            .iter()
            .map(|spec| Service {
                id: spec.id.to_string(),
                name: translator.translate(&format!("services.{}.name", spec.id)),
                icon: spec.icon.to_string(),
                description: translator.translate(&format!("services.{}.description", spec.id)),
                questions: spec
                    .questions
                    .iter()
                    .map(|question| SubThemeQuestion {
                        id: question.id.to_string(),
                        label: translator.translate(&format!("questions.{}", question.id)),
                        required: question.required,
                        kind: (question.kind)(),
                    })
                    .collect(),
            })
            .collect();
        Self { services }
    }

    pub fn all(&self) -> &[Service] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Service> {
        self.get(id)
            .ok_or_else(|| ReservationError::UnknownService(id.to_string()))
    }
}
