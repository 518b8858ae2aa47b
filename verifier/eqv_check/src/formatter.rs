//! Message templates with `%%` placeholders.

use std::fmt;

/// A message template whose `%%` placeholders are filled in order.
///
/// Surplus placeholders stay as they are; surplus arguments are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatter {
    template: &'static str,
    args: Vec<String>,
}

impl Formatter {
    pub fn of(template: &'static str) -> Self {
        Formatter {
            template,
            args: Vec::new(),
        }
    }

    /// Append the next placeholder value.
    #[must_use]
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// The filled-in message.
    pub fn format(&self) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut args = self.args.iter();
        let mut rest = self.template;
        while let Some(at) = rest.find("%%") {
            out.push_str(&rest[..at]);
            match args.next() {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%%"),
            }
            rest = &rest[at + 2..];
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
