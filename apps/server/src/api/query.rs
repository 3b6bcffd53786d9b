use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("missing required query parameter: stock")]
    MissingSymbol,

    #[error("at most two stock symbols may be compared, got {0}")]
    TooManySymbols(usize),

    #[error("stock symbol must not be empty")]
    EmptySymbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbols {
    One(String),
    Pair(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    pub symbols: Symbols,
    pub like: bool,
}

impl StockQuery {
    /// Builds the query from decoded `(key, value)` pairs in request order.
    /// `stock[]` is accepted as an alias for `stock`, the last `like` wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, QueryError> {
        let mut stocks: Vec<String> = Vec::new();
        let mut like = false;

        for (key, value) in pairs {
            match key.as_str() {
                "stock" | "stock[]" => {
                    let symbol = value.trim();
                    if symbol.is_empty() {
                        return Err(QueryError::EmptySymbol);
                    }
                    stocks.push(symbol.to_string());
                }
                "like" => like = truthy(value),
                _ => {}
            }
        }

        let symbols = match stocks.len() {
            0 => return Err(QueryError::MissingSymbol),
            1 => Symbols::One(stocks.remove(0)),
            2 => {
                let second = stocks.remove(1);
                Symbols::Pair(stocks.remove(0), second)
            }
            n => return Err(QueryError::TooManySymbols(n)),
        };

        Ok(Self { symbols, like })
    }
}

pub fn truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_symbol_without_like() {
        let query = StockQuery::from_pairs(&pairs(&[("stock", "GOOG")])).unwrap();
        assert_eq!(query.symbols, Symbols::One("GOOG".into()));
        assert!(!query.like);
    }

    #[test]
    fn pair_keeps_input_order() {
        let query =
            StockQuery::from_pairs(&pairs(&[("stock", "MSFT"), ("like", "true"), ("stock", "GOOG")]))
                .unwrap();
        assert_eq!(query.symbols, Symbols::Pair("MSFT".into(), "GOOG".into()));
        assert!(query.like);
    }

    #[test]
    fn bracket_array_form_is_accepted() {
        let query = StockQuery::from_pairs(&pairs(&[("stock[]", "a"), ("stock[]", "b")])).unwrap();
        assert_eq!(query.symbols, Symbols::Pair("a".into(), "b".into()));
    }

    #[test]
    fn symbols_are_trimmed() {
        let query = StockQuery::from_pairs(&pairs(&[("stock", " brk.b "), ("like", "1")])).unwrap();
        assert_eq!(query.symbols, Symbols::One("brk.b".into()));
        assert!(query.like);
    }

    #[test]
    fn like_flag_variants() {
        for (raw, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("yes", true),
            ("false", false),
            ("0", false),
            ("", false),
            ("off", false),
        ] {
            assert_eq!(truthy(raw), expected, "like={raw}");
        }
        let query = StockQuery::from_pairs(&pairs(&[
            ("stock", "GOOG"),
            ("like", "true"),
            ("like", "false"),
        ]))
        .unwrap();
        assert!(!query.like);
    }

    #[test]
    fn rejects_bad_symbol_counts() {
        assert_eq!(StockQuery::from_pairs(&[]), Err(QueryError::MissingSymbol));
        assert_eq!(
            StockQuery::from_pairs(&pairs(&[("like", "true")])),
            Err(QueryError::MissingSymbol)
        );
        assert_eq!(
            StockQuery::from_pairs(&pairs(&[("stock", "A"), ("stock", "B"), ("stock", "C")])),
            Err(QueryError::TooManySymbols(3))
        );
        assert_eq!(
            StockQuery::from_pairs(&pairs(&[("stock", " ")])),
            Err(QueryError::EmptySymbol)
        );
    }
}
