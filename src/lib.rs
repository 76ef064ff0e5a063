//! # EducaFoco
//!
//! A terminal dashboard with daily education news for teachers, produced by a
//! generative search model and sorted into tabs.
//!
//! ## Features
//!
//! - **Tagged sections**: the model is asked for `[PISO]`, `[CONCURSOS]`, `[BENEFICIOS]`,
//!   `[REGRAS]` and `[SINDICATO]` sections, which [`sections::classify`] splits into buckets
//! - **Grounded**: citation links from the search tool are listed next to the news
//! - **Single-flight refresh**: stale or concurrent fetches never overwrite newer results

pub mod agent;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod markup;
pub mod news;
pub mod prompt;
pub mod sections;
pub mod ui;

pub use agent::{AgentError, GeminiProvider, NewsProvider, StaticProvider};
pub use category::Category;
pub use config::Config;
pub use dashboard::{Dashboard, View};
pub use news::{GroundingSource, NewsResponse};
pub use sections::{classify, Sections};
