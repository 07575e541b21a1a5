/// GF(256) arithmetic for QR Reed-Solomon codes
/// Field generator polynomial x^8 + x^4 + x^3 + x^2 + 1, tables built at compile time
use crate::error::{QrError, Result};

/// Exponent/log tables over GF(256)
pub struct GaloisField {
    exp: [u8; 256],
    log: [u8; 256],
}

static FIELD: GaloisField = GaloisField::build();

impl GaloisField {
    const fn build() -> Self {
        let mut exp = [0u8; 256];
        let mut i = 0;
        while i < 8 {
            exp[i] = 1 << i;
            i += 1;
        }
        while i < 256 {
            exp[i] = exp[i - 4] ^ exp[i - 5] ^ exp[i - 6] ^ exp[i - 8];
            i += 1;
        }

        let mut log = [0u8; 256];
        let mut i = 0;
        while i < 255 {
            log[exp[i] as usize] = i as u8;
            i += 1;
        }

        Self { exp, log }
    }

    /// The process-wide field
    pub fn get() -> &'static GaloisField {
        &FIELD
    }

    /// Discrete logarithm; undefined for values below 1
    pub fn log(&self, n: i32) -> Result<i32> {
        if !(1..=255).contains(&n) {
            return Err(QrError::LogOfZero(n));
        }
        Ok(self.log[n as usize] as i32)
    }

    /// Exponentiation, defined for every integer (wrapped modulo 255)
    pub fn exp(&self, n: i32) -> u8 {
        self.exp[n.rem_euclid(255) as usize]
    }

    /// Product of two field elements
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = self.log[a as usize] as usize;
        let log_b = self.log[b as usize] as usize;
        self.exp[(log_a + log_b) % 255]
    }
}

/// `glog` on the shared field
pub fn glog(n: i32) -> Result<i32> {
    FIELD.log(n)
}

/// `gexp` on the shared field
pub fn gexp(n: i32) -> u8 {
    FIELD.exp(n)
}
