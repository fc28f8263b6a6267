use crate::error::Result;
use crate::macros::{MacroOverride, MacroTable, MacroType};
use tracing::{info, warn};

/// Accumulates the lines of a header and the messages raised while deriving
/// it. Stages append to it in order; a failing stage leaves everything
/// emitted before it in place.
#[derive(Clone, Debug, Default)]
pub struct HeaderBuilder {
    lines: Vec<String>,
    infos: Vec<String>,
    warnings: Vec<String>,
    macros: MacroTable,
}

impl HeaderBuilder {
    pub fn new<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = MacroOverride>,
    {
        Self {
            macros: MacroTable::new(overrides),
            ..Default::default()
        }
    }

    pub fn writeline<S: Into<String>>(&mut self, line: S) {
        self.lines.push(line.into());
    }

    pub fn writelines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub fn info<S: Into<String>>(&mut self, message: S) {
        let message: String = message.into();
        info!("{message}");
        self.infos.push(message);
    }

    pub fn warn<S: Into<String>>(&mut self, message: S) {
        let message: String = message.into();
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Declares a macro and emits `#define NAME value` for its resolved value.
    pub fn define<T, F>(&mut self, name: &str, default: F, overridable: bool) -> Result<T>
    where
        T: MacroType,
        F: FnOnce() -> Result<T>,
    {
        let value: T = self.macros.declare(name, default, overridable)?;
        self.lines.push(format!("#define {name} {}", value.render()));
        Ok(value)
    }

    /// Reports user definitions that no stage consumed.
    pub fn report_unused(&mut self) {
        let unused: Vec<String> = self
            .macros
            .unused()
            .into_iter()
            .map(str::to_string)
            .collect();
        for name in unused {
            self.info(format!("Macro {name} was defined but not used"));
        }
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The header text: one line per entry, newline terminated.
    pub fn render(&self) -> String {
        let mut text: String = self.lines.join("\n");
        text.push('\n');
        text
    }

    pub fn into_parts(self) -> (String, Vec<String>, Vec<String>) {
        let text: String = self.render();
        (text, self.infos, self.warnings)
    }
}
