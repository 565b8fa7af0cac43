/// One line of input to the `wayfind` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw JSON navigate request, validated by the service.
    Navigate(String),
    /// All locations, or only those of the named type (`locations exit`).
    Locations(Option<String>),
    Reload,
    Metrics,
}

impl Command {
    /// `None` for blank lines. Anything that is not a keyword is treated as a
    /// navigate request and rejected later if it is not one.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let mut words = line.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();
        let command = match (keyword.as_str(), argument, words.next()) {
            ("locations", filter, None) => Command::Locations(filter.map(str::to_string)),
            ("reload", None, _) => Command::Reload,
            ("metrics", None, _) => Command::Metrics,
            _ => Command::Navigate(line.to_string()),
        };
        Some(command)
    }
}
