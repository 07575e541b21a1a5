/// Polynomials over GF(256), highest-degree coefficient first
use super::gf256::GaloisField;

/// GF(256) polynomial stored as a coefficient list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    num: Vec<u8>,
}

impl Polynomial {
    /// Build from coefficients, stripping leading zeros and appending `shift` zero terms
    ///
    /// `len() == num.len() - leading_zeros + shift`
    pub fn new(num: &[u8], shift: usize) -> Self {
        let offset = num.iter().take_while(|&&c| c == 0).count();
        let mut coefficients = Vec::with_capacity(num.len() - offset + shift);
        coefficients.extend_from_slice(&num[offset..]);
        coefficients.resize(num.len() - offset + shift, 0);
        Self { num: coefficients }
    }

    /// Reed-Solomon generator of the given degree: prod_{i < degree} (x - 2^i)
    pub fn generator(degree: usize) -> Self {
        let field = GaloisField::get();
        (0..degree).fold(Polynomial::new(&[1], 0), |acc, i| {
            acc.multiply(&Polynomial::new(&[1, field.exp(i as i32)], 0))
        })
    }

    /// Coefficient at `index`, 0 past the end
    pub fn get(&self, index: usize) -> u8 {
        self.num.get(index).copied().unwrap_or(0)
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.num.len()
    }

    /// True for the zero polynomial built from all-zero input
    pub fn is_empty(&self) -> bool {
        self.num.is_empty()
    }

    /// Coefficients, highest degree first
    pub fn coefficients(&self) -> &[u8] {
        &self.num
    }

    /// Convolution in log/exp space; zero terms contribute nothing
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        if self.is_empty() || other.is_empty() {
            return Polynomial::new(&[], 0);
        }
        let field = GaloisField::get();
        let mut num = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.num.iter().enumerate() {
            for (j, &b) in other.num.iter().enumerate() {
                num[i + j] ^= field.mul(a, b);
            }
        }
        Polynomial::new(&num, 0)
    }

    /// Remainder of long division by `divisor`
    ///
    /// Each step cancels the leading term, so at most `len - divisor.len + 1` steps run.
    pub fn modulo(&self, divisor: &Polynomial) -> Polynomial {
        let field = GaloisField::get();
        let mut remainder = self.clone();
        while !divisor.is_empty() && remainder.len() >= divisor.len() {
            // Leading coefficients are non-zero after `new` strips zeros
            let lead = remainder.num[0];
            let ratio = log_of(field, lead) - log_of(field, divisor.num[0]);
            let mut num = remainder.num;
            for (slot, &d) in num.iter_mut().zip(&divisor.num) {
                if d != 0 {
                    *slot ^= field.exp(log_of(field, d) + ratio);
                }
            }
            remainder = Polynomial::new(&num, 0);
        }
        remainder
    }
}

fn log_of(field: &GaloisField, value: u8) -> i32 {
    // Only reached with non-zero values
    field.log(value as i32).unwrap_or(0)
}
