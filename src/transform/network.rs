use std::fmt;

/// School administration network ("Rede") as published by INEP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Network {
    Public,
    Private,
    State,
    Municipal,
    Federal,
    Other(String),
}

impl Network {
    /// Parse a source label. Case, surrounding whitespace and the accent in
    /// "Pública" are ignored; unknown labels are kept verbatim (trimmed).
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "pública" | "publica" | "public" => Self::Public,
            "privada" | "private" => Self::Private,
            "estadual" | "state" => Self::State,
            "municipal" => Self::Municipal,
            "federal" => Self::Federal,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Label shown in tables and chart legends.
    pub fn label(&self) -> &str {
        match self {
            Self::Public => "Pública",
            Self::Private => "Privada",
            Self::State => "Estadual",
            Self::Municipal => "Municipal",
            Self::Federal => "Federal",
            Self::Other(label) => label,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_and_english_labels() {
        assert_eq!(Network::parse("Pública"), Network::Public);
        assert_eq!(Network::parse(" PUBLICA "), Network::Public);
        assert_eq!(Network::parse("Public"), Network::Public);
        assert_eq!(Network::parse("Privada"), Network::Private);
        assert_eq!(Network::parse("Estadual"), Network::State);
        assert_eq!(Network::parse("municipal"), Network::Municipal);
        assert_eq!(Network::parse("Federal"), Network::Federal);
        assert_eq!(
            Network::parse(" Comunitária "),
            Network::Other("Comunitária".into())
        );
    }

    #[test]
    fn label_round_trips_through_parse() {
        for n in [
            Network::Public,
            Network::Private,
            Network::State,
            Network::Municipal,
            Network::Federal,
        ] {
            assert_eq!(Network::parse(n.label()), n);
        }
        assert_eq!(Network::Public.to_string(), "Pública");
    }
}
