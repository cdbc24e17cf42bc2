use serde::Serialize;
use std::{collections::BTreeMap, fmt};

/// The seven searches exposed by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationId {
    #[default]
    PatternPrime,
    RepunitPrimes,
    MersennePrimes,
    PrimesBetweenSquares,
    PalindromicPrime,
    PerfectNumber,
    GoldbachPair,
}

impl OperationId {
    pub const ALL: [OperationId; 7] = [
        OperationId::PatternPrime,
        OperationId::RepunitPrimes,
        OperationId::MersennePrimes,
        OperationId::PrimesBetweenSquares,
        OperationId::PalindromicPrime,
        OperationId::PerfectNumber,
        OperationId::GoldbachPair,
    ];

    pub fn number(self) -> u8 {
        match self {
            OperationId::PatternPrime => 1,
            OperationId::RepunitPrimes => 2,
            OperationId::MersennePrimes => 3,
            OperationId::PrimesBetweenSquares => 4,
            OperationId::PalindromicPrime => 5,
            OperationId::PerfectNumber => 6,
            OperationId::GoldbachPair => 7,
        }
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    /// Endpoint name appended to the service base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            OperationId::PatternPrime => "problem1",
            OperationId::RepunitPrimes => "problem2",
            OperationId::MersennePrimes => "problem3",
            OperationId::PrimesBetweenSquares => "problem4",
            OperationId::PalindromicPrime => "problem5",
            OperationId::PerfectNumber => "problem6",
            OperationId::GoldbachPair => "problem7",
        }
    }

    pub fn descriptor(self) -> &'static OperationDescriptor {
        &DESCRIPTORS[usize::from(self.number()) - 1]
    }
}

/// Static metadata for one operation. Field order is the form order.
#[derive(Debug)]
pub struct OperationDescriptor {
    pub id: OperationId,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
}

impl OperationDescriptor {
    pub fn default_inputs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

pub static DESCRIPTORS: [OperationDescriptor; 7] = [
    OperationDescriptor {
        id: OperationId::PatternPrime,
        title: "Pattern Prime",
        description: "Find a prime of the form 123...n...321 for n in a range",
        fields: &[("n", "10"), ("max_n", "3000")],
    },
    OperationDescriptor {
        id: OperationId::RepunitPrimes,
        title: "Repunit Primes",
        description: "Prime repunits R(N) for prime N up to a limit",
        fields: &[("limit", "50")],
    },
    OperationDescriptor {
        id: OperationId::MersennePrimes,
        title: "Mersenne Primes",
        description: "Primes of the form 2^p - 1 for p in a range",
        fields: &[("start", "2"), ("end", "31")],
    },
    OperationDescriptor {
        id: OperationId::PrimesBetweenSquares,
        title: "Primes Between Squares",
        description: "Primes between p1^2 and p2^2 (Brocard's conjecture)",
        fields: &[("p1", "13"), ("p2", "17")],
    },
    OperationDescriptor {
        id: OperationId::PalindromicPrime,
        title: "Palindromic Prime",
        description: "A palindromic prime with at least the given number of digits",
        fields: &[("limit_digits", "10")],
    },
    OperationDescriptor {
        id: OperationId::PerfectNumber,
        title: "Perfect Number",
        description: "Perfect number 2^(p-1) * (2^p - 1) from a Mersenne prime",
        fields: &[("p", "5")],
    },
    OperationDescriptor {
        id: OperationId::GoldbachPair,
        title: "Goldbach Pair",
        description: "Two primes that sum to an even number",
        fields: &[("even_n", "20")],
    },
];

/// JSON body sent for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestPayload(BTreeMap<String, i64>);

impl RequestPayload {
    /// Parses every field value; the first non-integer field aborts the parse.
    pub fn parse(inputs: &[(String, String)]) -> Result<Self, InputError> {
        let mut values = BTreeMap::new();
        for (field, raw) in inputs {
            let value = raw.trim().parse::<i64>().map_err(|_| InputError {
                field: field.clone(),
                value: raw.clone(),
            })?;
            values.insert(field.clone(), value);
        }
        Ok(Self(values))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    pub field: String,
    pub value: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: \"{}\" is not a whole number",
            field_label(&self.field),
            self.value
        )
    }
}

impl std::error::Error for InputError {}

/// Human label for a payload field name.
pub fn field_label(field: &str) -> String {
    field.replace('_', " ")
}
