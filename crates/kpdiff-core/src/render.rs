//! Output rendering for diff records.

use crate::diff::DiffRecord;
use crate::models::Entry;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

const MASK: &str = "********";

/// Output format for rendered records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `+`/`-`/`c` prefixed lines, one field triple per line.
    #[default]
    Text,
    /// One JSON object per record per line.
    Json,
}

/// Renders diff records to a writer.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    separator: String,
    mask_passwords: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(OutputFormat::Text)
    }
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            separator: "::".to_string(),
            mask_passwords: false,
        }
    }

    /// Set the separator placed between title, username and password.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replace passwords with a fixed mask in all output.
    pub fn with_masked_passwords(mut self, mask: bool) -> Self {
        self.mask_passwords = mask;
        self
    }

    /// Write one record followed by a newline.
    pub fn write_record<W: Write>(&self, out: &mut W, record: &DiffRecord<'_>) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for line in self.text_lines(record) {
                    writeln!(out, "{line}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &self.json_record(record))?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Text lines for one record: one line, or two for a change.
    pub fn text_lines(&self, record: &DiffRecord<'_>) -> Vec<String> {
        match record {
            DiffRecord::Added { entry, .. } => vec![format!("+ {}", self.fields(entry))],
            DiffRecord::Removed { entry, .. } => vec![format!("- {}", self.fields(entry))],
            DiffRecord::Changed { old, new, .. } => vec![
                format!("c {}", self.fields(old)),
                format!("  {}", self.fields(new)),
            ],
        }
    }

    fn fields(&self, entry: &Entry) -> String {
        let sep = &self.separator;
        format!(
            "{}{sep}{}{sep}{}",
            entry.title,
            entry.username,
            self.password(entry)
        )
    }

    fn password<'e>(&self, entry: &'e Entry) -> &'e str {
        if self.mask_passwords {
            MASK
        } else {
            &entry.password
        }
    }

    fn json_record<'a>(&self, record: &DiffRecord<'a>) -> JsonRecord<'a> {
        match *record {
            DiffRecord::Added { group, entry } => JsonRecord::Added {
                group,
                entry: self.json_entry(entry),
            },
            DiffRecord::Removed { group, entry } => JsonRecord::Removed {
                group,
                entry: self.json_entry(entry),
            },
            DiffRecord::Changed { group, old, new } => JsonRecord::Changed {
                group,
                old: self.json_entry(old),
                new: self.json_entry(new),
            },
        }
    }

    fn json_entry<'a>(&self, entry: &'a Entry) -> JsonEntry<'a> {
        JsonEntry {
            uuid: &entry.uuid,
            title: &entry.title,
            username: &entry.username,
            password: self.password(entry),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum JsonRecord<'a> {
    Added {
        group: &'a str,
        entry: JsonEntry<'a>,
    },
    Removed {
        group: &'a str,
        entry: JsonEntry<'a>,
    },
    Changed {
        group: &'a str,
        old: JsonEntry<'a>,
        new: JsonEntry<'a>,
    },
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    uuid: &'a str,
    title: &'a str,
    username: &'a str,
    password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(renderer: &Renderer, record: &DiffRecord<'_>) -> String {
        let mut out = Vec::new();
        renderer.write_record(&mut out, record).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_matches_reference_layout() {
        let old = Entry::new("1", "Mail", "me", "pw");
        let new = Entry::new("1", "Mail", "me", "pw2");
        let renderer = Renderer::default();

        assert_eq!(
            render(&renderer, &DiffRecord::Added { group: "G", entry: &new }),
            "+ Mail::me::pw2\n"
        );
        assert_eq!(
            render(&renderer, &DiffRecord::Removed { group: "G", entry: &old }),
            "- Mail::me::pw\n"
        );
        assert_eq!(
            render(
                &renderer,
                &DiffRecord::Changed {
                    group: "G",
                    old: &old,
                    new: &new
                }
            ),
            "c Mail::me::pw\n  Mail::me::pw2\n"
        );
    }

    #[test]
    fn masking_and_separator() {
        let entry = Entry::new("1", "Bank", "alice", "s3cret");
        let renderer = Renderer::default()
            .with_separator(" | ")
            .with_masked_passwords(true);

        assert_eq!(
            renderer.text_lines(&DiffRecord::Added { group: "G", entry: &entry }),
            vec!["+ Bank | alice | ********".to_string()]
        );
    }

    #[test]
    fn json_lines_carry_group_and_kind() {
        let old = Entry::new("1", "Mail", "me", "pw");
        let new = Entry::new("1", "Mail2", "me", "pw");
        let renderer = Renderer::new(OutputFormat::Json).with_masked_passwords(true);

        let line = render(
            &renderer,
            &DiffRecord::Changed {
                group: "Personal",
                old: &old,
                new: &new,
            },
        );
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["kind"], "changed");
        assert_eq!(value["group"], "Personal");
        assert_eq!(value["old"]["title"], "Mail");
        assert_eq!(value["new"]["title"], "Mail2");
        assert_eq!(value["new"]["uuid"], "1");
        assert_eq!(value["new"]["password"], MASK);
    }
}
