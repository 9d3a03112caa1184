//! Markup rendering for the generated region.

use crate::config::Config;
use crate::credits::CreditRecord;

/// Escape text for use in markup content and double-quoted attributes.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders ranked credits into a marker-bounded fragment.
///
/// Output is a pure function of the credit list, so rendering the same list
/// twice yields identical bytes.
#[derive(Debug, Clone)]
pub struct RegionRenderer {
    start_marker: String,
    end_marker: String,
    poster_path: String,
    poster_extension: String,
    empty_message: String,
}

impl RegionRenderer {
    pub fn new(
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        poster_path: impl Into<String>,
        poster_extension: impl Into<String>,
        empty_message: impl Into<String>,
    ) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            poster_path: poster_path.into(),
            poster_extension: poster_extension.into(),
            empty_message: empty_message.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.document.start_marker.clone(),
            config.document.end_marker.clone(),
            config.posters.public_path.clone(),
            config.posters.extension.clone(),
            config.document.empty_message.clone(),
        )
    }

    /// Render the full fragment, markers included.
    pub fn render(&self, credits: &[CreditRecord]) -> String {
        let mut lines = vec![self.start_marker.clone()];

        if credits.is_empty() {
            lines.push(format!(
                r#"<p class="project-empty" data-i18n="no_credits">{}</p>"#,
                html_escape(&self.empty_message)
            ));
        } else {
            for credit in credits {
                self.push_card(&mut lines, credit);
            }
        }

        lines.push(self.end_marker.clone());
        lines.join("\n")
    }

    fn push_card(&self, lines: &mut Vec<String>, credit: &CreditRecord) {
        let name = html_escape(&credit.name);
        let label = html_escape(&credit.type_label);
        let poster_src = format!(
            "{}/{}.{}",
            self.poster_path.trim_end_matches('/'),
            credit.id,
            self.poster_extension
        );
        let year = credit
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());

        lines.push(format!(
            r#"            <a href="{}" target="_blank" rel="noopener" class="project-card">"#,
            html_escape(&credit.permalink)
        ));
        lines.push(format!(
            r#"                <img class="project-poster" src="{}" alt="{} poster" loading="lazy">"#,
            html_escape(&poster_src),
            name
        ));
        lines.push(format!(
            r#"                <span class="project-year">{}</span>"#,
            year
        ));
        lines.push(format!(
            r#"                <h3 class="project-name">{}</h3>"#,
            name
        ));
        lines.push(format!(
            r#"                <p class="project-desc" data-type-key="{}" data-type-fallback="{}">{}</p>"#,
            html_escape(&credit.type_key),
            label,
            label
        ));
        lines.push("            </a>".to_string());
    }
}
