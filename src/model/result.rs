use super::operation::OperationId;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use std::fmt;

/// Exact base-10 integer text. Never parsed into a fixed-width number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalString(String);

impl DecimalString {
    pub fn parse(text: &str) -> Result<Self, String> {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("\"{text}\" is not a decimal integer"));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digit_count(&self) -> usize {
        self.0.trim_start_matches('-').len()
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Accepts both `"123"` and a bare `123`. With serde_json's arbitrary_precision
// feature a bare number keeps its exact source text.
impl<'de> Deserialize<'de> for DecimalString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Self::parse(&text).map_err(de::Error::custom),
            Value::Number(number) => Self::parse(&number.to_string()).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected a decimal integer, found {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternPrime {
    #[serde(default)]
    pub n: Option<u64>,
    #[serde(default)]
    pub is_prime: Option<bool>,
    #[serde(default)]
    pub pattern_number: Option<DecimalString>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepunitPrime {
    #[serde(rename = "N")]
    pub n: u64,
    pub repunit: DecimalString,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MersennePrime {
    pub p: u64,
    pub mersenne_prime: DecimalString,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SquareInterval {
    pub interval: [u64; 2],
    #[serde(default)]
    pub primes_found: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PalindromicPrime {
    pub digits: u64,
    pub palindromic_prime: DecimalString,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PerfectNumber {
    pub p: u64,
    pub perfect_number: DecimalString,
    #[serde(default)]
    pub pdf_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoldbachPair {
    pub n: u64,
    #[serde(default, deserialize_with = "deserialize_pair")]
    pub pair: Option<(u64, u64)>,
}

fn deserialize_pair<'de, D>(deserializer: D) -> Result<Option<(u64, u64)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<u64>>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some([]) => Ok(None),
        Some([first, second]) => Ok(Some((*first, *second))),
        Some(other) => Err(de::Error::invalid_length(other.len(), &"two primes")),
    }
}

/// Outcome of one submission, keyed by operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    PatternPrime(PatternPrime),
    RepunitPrimes(Vec<RepunitPrime>),
    MersennePrimes(Vec<MersennePrime>),
    PrimesBetweenSquares(SquareInterval),
    PalindromicPrime(PalindromicPrime),
    PerfectNumber(PerfectNumber),
    GoldbachPair(GoldbachPair),
    Error(String),
}

impl OperationResult {
    /// Decodes a 2xx response body for `operation`. An `error` member in the
    /// body wins over the operation's own shape.
    pub fn decode(operation: OperationId, body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if let Some(message) = application_error(&value) {
            return Ok(Self::Error(message));
        }
        let result = match operation {
            OperationId::PatternPrime => Self::PatternPrime(serde_json::from_slice(body)?),
            OperationId::RepunitPrimes => Self::RepunitPrimes(serde_json::from_slice(body)?),
            OperationId::MersennePrimes => Self::MersennePrimes(serde_json::from_slice(body)?),
            OperationId::PrimesBetweenSquares => {
                Self::PrimesBetweenSquares(serde_json::from_slice(body)?)
            }
            OperationId::PalindromicPrime => {
                Self::PalindromicPrime(serde_json::from_slice(body)?)
            }
            OperationId::PerfectNumber => Self::PerfectNumber(serde_json::from_slice(body)?),
            OperationId::GoldbachPair => Self::GoldbachPair(serde_json::from_slice(body)?),
        };
        Ok(result)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OperationResult::Error(message) => Some(message),
            _ => None,
        }
    }
}

fn application_error(value: &Value) -> Option<String> {
    match value.as_object()?.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(operation: OperationId, body: &str) -> OperationResult {
        OperationResult::decode(operation, body.as_bytes()).expect("decodes")
    }

    #[test]
    fn pattern_prime_keeps_digits_verbatim() {
        let result = decode(
            OperationId::PatternPrime,
            r#"{"n":10,"is_prime":true,"pattern_number":"12345678910987654321"}"#,
        );
        let OperationResult::PatternPrime(found) = result else {
            panic!("unexpected result {result:?}");
        };
        assert_eq!(found.n, Some(10));
        assert_eq!(found.is_prime, Some(true));
        assert_eq!(
            found.pattern_number.unwrap().as_str(),
            "12345678910987654321"
        );
    }

    #[test]
    fn pattern_prime_not_found_has_null_fields() {
        let result = decode(
            OperationId::PatternPrime,
            r#"{"n":null,"pattern_number":null,"is_prime":false}"#,
        );
        assert_eq!(
            result,
            OperationResult::PatternPrime(PatternPrime {
                n: None,
                is_prime: Some(false),
                pattern_number: None,
            })
        );
    }

    #[test]
    fn bare_json_integers_are_not_rounded() {
        let digits = format!("1{}1", "0".repeat(98));
        let body = format!(r#"[{{"p":127,"mersenne_prime":{digits}}}]"#);
        let OperationResult::MersennePrimes(rows) = decode(OperationId::MersennePrimes, &body)
        else {
            panic!("expected mersenne rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].p, 127);
        assert_eq!(rows[0].mersenne_prime.as_str(), digits);
        assert_eq!(rows[0].mersenne_prime.digit_count(), 100);
    }

    #[test]
    fn palindromic_prime_accepts_a_bare_integer() {
        let result = decode(
            OperationId::PalindromicPrime,
            r#"{"digits":11,"palindromic_prime":10000500001}"#,
        );
        assert_eq!(
            result,
            OperationResult::PalindromicPrime(PalindromicPrime {
                digits: 11,
                palindromic_prime: DecimalString::parse("10000500001").unwrap(),
            })
        );

        let digits = format!("1{}1", "0".repeat(299));
        let body = format!(r#"{{"digits":301,"palindromic_prime":{digits}}}"#);
        let OperationResult::PalindromicPrime(found) = decode(OperationId::PalindromicPrime, &body)
        else {
            panic!("expected palindromic prime");
        };
        assert_eq!(found.palindromic_prime.as_str(), digits);
        assert_eq!(found.palindromic_prime.digit_count(), 301);
    }

    #[test]
    fn perfect_number_pdf_path_is_optional() {
        let result = decode(
            OperationId::PerfectNumber,
            r#"{"p":5,"perfect_number":"496","pdf_path":"problem6.pdf"}"#,
        );
        assert_eq!(
            result,
            OperationResult::PerfectNumber(PerfectNumber {
                p: 5,
                perfect_number: DecimalString::parse("496").unwrap(),
                pdf_path: Some("problem6.pdf".into()),
            })
        );

        let result = decode(OperationId::PerfectNumber, r#"{"p":5,"perfect_number":"496"}"#);
        let OperationResult::PerfectNumber(found) = result else {
            panic!("unexpected result {result:?}");
        };
        assert_eq!(found.perfect_number.as_str(), "496");
        assert_eq!(found.pdf_path, None);
    }

    #[test]
    fn error_member_takes_precedence() {
        let result = decode(
            OperationId::GoldbachPair,
            r#"{"n":21,"pair":[2,19],"error":"Input must be even > 2"}"#,
        );
        assert_eq!(result.error(), Some("Input must be even > 2"));
    }

    #[test]
    fn goldbach_pair_may_be_missing() {
        for body in [r#"{"n":20,"pair":null}"#, r#"{"n":20,"pair":[]}"#, r#"{"n":20}"#] {
            let OperationResult::GoldbachPair(found) = decode(OperationId::GoldbachPair, body)
            else {
                panic!("expected goldbach result for {body}");
            };
            assert_eq!(found.pair, None);
        }
        let OperationResult::GoldbachPair(found) =
            decode(OperationId::GoldbachPair, r#"{"n":20,"pair":[3,17]}"#)
        else {
            panic!("expected goldbach result");
        };
        assert_eq!(found.pair, Some((3, 17)));
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        assert!(OperationResult::decode(OperationId::RepunitPrimes, br#"{"n":3}"#).is_err());
        assert!(
            OperationResult::decode(OperationId::GoldbachPair, br#"{"n":20,"pair":[3]}"#)
                .is_err()
        );
        assert!(
            OperationResult::decode(
                OperationId::PalindromicPrime,
                br#"{"digits":3,"palindromic_prime":"10x01"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn decimal_string_rejects_non_digits() {
        assert!(DecimalString::parse("").is_err());
        assert!(DecimalString::parse("-").is_err());
        assert!(DecimalString::parse("1.5").is_err());
        assert!(DecimalString::parse("1e9").is_err());
        assert_eq!(DecimalString::parse("-42").unwrap().digit_count(), 2);
    }
}
