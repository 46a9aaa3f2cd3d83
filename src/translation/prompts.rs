/*!
 * Prompt template for translating machine-control UI labels.
 *
 * The prompt pins the provider to the shape the gateway can parse back:
 * one translated line per input line, same order, nothing else.
 */

/// Prompt template for label translation.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default prompt for laser / CNC label files.
    ///
    /// Placeholders: `{source_language}`, `{target_language}`, `{texts}`.
    pub const LASER_UI_TRANSLATOR: &'static str = r#"You are an expert technical translator for laser machine software (cutters, engravers).
Translate from {source_language} to {target_language}, preserving:
- The technical context of the laser and CNC industry
- Industry terminology (e.g. Pierce Method, Laser Type, Cutting Speed, Focus Height)
- Consistency with CNC/CAM software
- Natural {target_language} phrasing

IMPORTANT RULES:
- Translate ONLY the meaning, keep the length similar to the original
- Use established {target_language} technical terms from the laser industry
- Do not add explanations or comments
- Keep the UI style (short, concise labels)

Texts to translate (one per line):
{texts}

Return ONLY the translated texts in the same order, one per line:"#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default laser UI translator template.
    pub fn laser_ui_translator() -> Self {
        Self::new(Self::LASER_UI_TRANSLATOR)
    }

    /// Render the template for a list of texts.
    pub fn render(&self, source_language: &str, target_language: &str, texts: &[String]) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
            .replace("{texts}", &texts.join("\n"))
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::laser_ui_translator()
    }
}
