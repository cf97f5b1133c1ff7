//! User-facing literals. The board speaks Swedish.

pub const NO_ARTICLES: &str = "Inga nyheter tillgängliga";
pub const LOAD_FAILED: &str = "Kunde inte ladda nyheter";
pub const GENERATION_FAILED: &str = "Kunde inte generera nyheter. Försök igen.";
pub const GENERATION_SUCCEEDED: &str = "Nya nyheter genererade! Laddar om...";
pub const GENERATING_LABEL: &str = "Genererar nyheter...";
pub const GENERATE_LABEL: &str = "Generera nyheter";
pub const TOPIC_PROMPT: &str = "Välj ämne för nyheter (eller lämna tomt för allmänna nyheter):";
pub const READ_MORE: &str = "Läs mer";
pub const PUBLISHED_PREFIX: &str = "Publicerad:";
pub const SEARCH_PLACEHOLDER: &str = "Sök nyheter...";

/// Topic sent when the user leaves the prompt empty.
pub const DEFAULT_TOPIC: &str = "aktuella nyheter Sverige";
