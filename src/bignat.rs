//! Arbitrary-precision nonnegative integer arithmetic (layer L0).
//!
//! [`BigNat`] stores its magnitude as a little-endian vector of base-2^32
//! limbs, normalized on exit from every operation: no trailing zero limb
//! except for the value zero, which is canonically the empty vector.
//! [`Int`] extends it with a sign flag for the transient signed arithmetic
//! extended-Euclidean inversion needs; it is not part of the public wire
//! format, only [`BigNat`] is.

use crate::error::Error;
use alloc::{format, string::String, vec, vec::Vec};
use core::cmp::Ordering;
use rand_core::RngCore;
use zeroize::Zeroize;

/// An arbitrary-precision nonnegative integer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BigNat {
    /// Little-endian base-2^32 limbs; normalized (see module docs).
    limbs: Vec<u32>,
}

impl Zeroize for BigNat {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.limbs.clear();
    }
}

impl BigNat {
    /// The value zero.
    pub fn zero() -> Self {
        BigNat { limbs: Vec::new() }
    }

    /// The value one.
    pub fn one() -> Self {
        BigNat { limbs: vec![1] }
    }

    /// The value two.
    pub fn two() -> Self {
        BigNat { limbs: vec![2] }
    }

    /// Build a `BigNat` from a native 64-bit value.
    pub fn from_u64(value: u64) -> Self {
        let lo = value as u32;
        let hi = (value >> 32) as u32;
        let mut limbs = if hi == 0 { vec![lo] } else { vec![lo, hi] };
        Self::normalize_limbs(&mut limbs);
        BigNat { limbs }
    }

    fn normalize_limbs(limbs: &mut Vec<u32>) {
        while matches!(limbs.last(), Some(0)) {
            limbs.pop();
        }
    }

    fn from_limbs(mut limbs: Vec<u32>) -> Self {
        Self::normalize_limbs(&mut limbs);
        BigNat { limbs }
    }

    /// `true` iff `self == 0`.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// `true` iff `self == 1`.
    pub fn is_one(&self) -> bool {
        self.limbs.as_slice() == [1]
    }

    /// `true` iff `self` is even.
    pub fn is_even(&self) -> bool {
        self.limbs.first().copied().unwrap_or(0) & 1 == 0
    }

    /// Position of the highest set bit, plus one; zero for the value zero.
    pub fn bit_length(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(&top) => (self.limbs.len() - 1) * 32 + (32 - top.leading_zeros() as usize),
        }
    }

    /// `ceil(bit_length() / 8)`.
    pub fn byte_length(&self) -> usize {
        self.bit_length().div_ceil(8)
    }

    /// Value of bit `i` (0 = least significant).
    pub fn get_bit(&self, i: usize) -> bool {
        let limb = i / 32;
        let bit = i % 32;
        self.limbs
            .get(limb)
            .map(|&word| (word >> bit) & 1 == 1)
            .unwrap_or(false)
    }

    fn cmp_magnitude(a: &[u32], b: &[u32]) -> Ordering {
        if a.len() != b.len() {
            return a.len().cmp(&b.len());
        }
        for i in (0..a.len()).rev() {
            if a[i] != b[i] {
                return a[i].cmp(&b[i]);
            }
        }
        Ordering::Equal
    }

    /// `self + other`.
    pub fn add(&self, other: &BigNat) -> BigNat {
        let n = self.limbs.len().max(other.limbs.len());
        let mut result = Vec::with_capacity(n + 1);
        let mut carry: u64 = 0;
        for i in 0..n {
            let a = *self.limbs.get(i).unwrap_or(&0) as u64;
            let b = *other.limbs.get(i).unwrap_or(&0) as u64;
            let sum = a + b + carry;
            result.push(sum as u32);
            carry = sum >> 32;
        }
        if carry > 0 {
            result.push(carry as u32);
        }
        Self::from_limbs(result)
    }

    /// `self - other`. Fails with [`Error::ArithmeticFailure`] if `self < other`
    /// (a `BigNat` cannot represent a negative magnitude).
    pub fn sub(&self, other: &BigNat) -> Result<BigNat, Error> {
        if Self::cmp_magnitude(&self.limbs, &other.limbs) == Ordering::Less {
            return Err(Error::ArithmeticFailure);
        }
        let mut result = Vec::with_capacity(self.limbs.len());
        let mut borrow: i64 = 0;
        for i in 0..self.limbs.len() {
            let a = self.limbs[i] as i64;
            let b = *other.limbs.get(i).unwrap_or(&0) as i64;
            let mut diff = a - b - borrow;
            if diff < 0 {
                diff += 1i64 << 32;
                borrow = 1;
            } else {
                borrow = 0;
            }
            result.push(diff as u32);
        }
        Ok(Self::from_limbs(result))
    }

    /// `self * other` (schoolbook, O(n*m) in limb count).
    pub fn mul(&self, other: &BigNat) -> BigNat {
        if self.is_zero() || other.is_zero() {
            return BigNat::zero();
        }
        let mut result = vec![0u32; self.limbs.len() + other.limbs.len()];
        for (i, &a) in self.limbs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let mut carry: u64 = 0;
            for (j, &b) in other.limbs.iter().enumerate() {
                let idx = i + j;
                let prod = (a as u64) * (b as u64) + result[idx] as u64 + carry;
                result[idx] = prod as u32;
                carry = prod >> 32;
            }
            let mut k = i + other.limbs.len();
            while carry != 0 {
                let sum = result[k] as u64 + carry;
                result[k] = sum as u32;
                carry = sum >> 32;
                k += 1;
            }
        }
        Self::from_limbs(result)
    }

    /// Logical left shift of the magnitude.
    pub fn shl(&self, bits: usize) -> BigNat {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let limb_shift = bits / 32;
        let bit_shift = bits % 32;
        let mut result = vec![0u32; self.limbs.len() + limb_shift + 1];
        for (i, &limb) in self.limbs.iter().enumerate() {
            let shifted = (limb as u64) << bit_shift;
            result[i + limb_shift] |= shifted as u32;
            result[i + limb_shift + 1] |= (shifted >> 32) as u32;
        }
        Self::from_limbs(result)
    }

    /// Logical right shift of the magnitude.
    pub fn shr(&self, bits: usize) -> BigNat {
        if bits == 0 || self.is_zero() {
            return self.clone();
        }
        let limb_shift = bits / 32;
        let bit_shift = bits % 32;
        if limb_shift >= self.limbs.len() {
            return BigNat::zero();
        }
        let mut result = vec![0u32; self.limbs.len() - limb_shift];
        for i in 0..result.len() {
            let lo = self.limbs[i + limb_shift] as u64;
            let hi = if i + limb_shift + 1 < self.limbs.len() {
                self.limbs[i + limb_shift + 1] as u64
            } else {
                0
            };
            let combined = if bit_shift == 0 {
                lo
            } else {
                (lo >> bit_shift) | (hi << (32 - bit_shift))
            };
            result[i] = combined as u32;
        }
        Self::from_limbs(result)
    }

    /// Bitwise AND over magnitudes.
    pub fn bitand(&self, other: &BigNat) -> BigNat {
        let n = self.limbs.len().min(other.limbs.len());
        let mut result = Vec::with_capacity(n);
        for i in 0..n {
            result.push(self.limbs[i] & other.limbs[i]);
        }
        Self::from_limbs(result)
    }

    /// Bitwise OR over magnitudes.
    pub fn bitor(&self, other: &BigNat) -> BigNat {
        let n = self.limbs.len().max(other.limbs.len());
        let mut result = Vec::with_capacity(n);
        for i in 0..n {
            result.push(self.limbs.get(i).unwrap_or(&0) | other.limbs.get(i).unwrap_or(&0));
        }
        Self::from_limbs(result)
    }

    /// `(self / divisor, self % divisor)`, satisfying
    /// `dividend = quotient*divisor + remainder`, `0 <= remainder < divisor`.
    ///
    /// Fails with [`Error::ArithmeticFailure`] on division by zero.
    pub fn div_rem(&self, divisor: &BigNat) -> Result<(BigNat, BigNat), Error> {
        if divisor.is_zero() {
            return Err(Error::ArithmeticFailure);
        }
        if Self::cmp_magnitude(&self.limbs, &divisor.limbs) == Ordering::Less {
            return Ok((BigNat::zero(), self.clone()));
        }
        let bits = self.bit_length();
        let mut quotient_limbs: Vec<u32> = vec![0u32; bits.div_ceil(32)];
        let mut remainder = BigNat::zero();
        for i in (0..bits).rev() {
            remainder = remainder.shl(1);
            if self.get_bit(i) {
                remainder = remainder.add(&BigNat::one());
            }
            if Self::cmp_magnitude(&remainder.limbs, &divisor.limbs) != Ordering::Less {
                remainder = remainder.sub(divisor).expect("remainder >= divisor");
                quotient_limbs[i / 32] |= 1 << (i % 32);
            }
        }
        Ok((Self::from_limbs(quotient_limbs), remainder))
    }

    /// `self % modulus`.
    pub fn rem(&self, modulus: &BigNat) -> Result<BigNat, Error> {
        Ok(self.div_rem(modulus)?.1)
    }

    /// `(self + other) mod modulus`.
    pub fn mod_add(&self, other: &BigNat, modulus: &BigNat) -> Result<BigNat, Error> {
        self.add(other).rem(modulus)
    }

    /// `(self - other) mod modulus`.
    pub fn mod_sub(&self, other: &BigNat, modulus: &BigNat) -> Result<BigNat, Error> {
        if modulus.is_zero() {
            return Err(Error::ArithmeticFailure);
        }
        Ok(Int::from_bignat(self.clone())
            .sub(&Int::from_bignat(other.clone()))
            .rem_euclid(modulus))
    }

    /// `(self * other) mod modulus`.
    pub fn mod_mul(&self, other: &BigNat, modulus: &BigNat) -> Result<BigNat, Error> {
        self.mul(other).rem(modulus)
    }

    /// `self^exponent mod modulus`, square-and-multiply from the top bit down.
    pub fn mod_pow(&self, exponent: &BigNat, modulus: &BigNat) -> Result<BigNat, Error> {
        if modulus.is_zero() {
            return Err(Error::ArithmeticFailure);
        }
        if modulus.is_one() {
            return Ok(BigNat::zero());
        }
        let base = self.rem(modulus)?;
        let mut result = BigNat::one();
        for i in (0..exponent.bit_length()).rev() {
            result = result.mod_mul(&result, modulus)?;
            if exponent.get_bit(i) {
                result = result.mod_mul(&base, modulus)?;
            }
        }
        Ok(result)
    }

    /// Multiplicative inverse of `self` modulo `modulus`, via the extended
    /// Euclidean algorithm. Fails with [`Error::ArithmeticFailure`] when
    /// `gcd(self, modulus) != 1`.
    pub fn mod_inverse(&self, modulus: &BigNat) -> Result<BigNat, Error> {
        if modulus.is_zero() {
            return Err(Error::ArithmeticFailure);
        }
        let mut old_r = self.rem(modulus)?;
        let mut r = modulus.clone();
        let mut old_s = Int::one();
        let mut s = Int::zero();
        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            old_r = r;
            r = rem;
            let new_s = old_s.sub(&Int::from_bignat(q).mul(&s));
            old_s = s;
            s = new_s;
        }
        if !old_r.is_one() {
            return Err(Error::ArithmeticFailure);
        }
        Ok(old_s.rem_euclid(modulus))
    }

    /// Big-endian encoding, zero-padded on the left to `min_bytes` (no
    /// padding, minimal length, if `min_bytes == 0`). Fails if the value
    /// does not fit in `min_bytes` octets.
    pub fn to_bytes(&self, min_bytes: usize, little_endian: bool) -> Result<Vec<u8>, Error> {
        if min_bytes > 0 && self.byte_length() > min_bytes {
            return Err(Error::InvalidInput);
        }
        let len = if min_bytes > 0 {
            min_bytes
        } else {
            self.byte_length()
        };
        let mut be = vec![0u8; len];
        let mut idx = len;
        'outer: for &limb in &self.limbs {
            let mut word = limb;
            for _ in 0..4 {
                if idx == 0 {
                    break 'outer;
                }
                idx -= 1;
                be[idx] = (word & 0xFF) as u8;
                word >>= 8;
            }
        }
        if little_endian {
            be.reverse();
        }
        Ok(be)
    }

    /// Decode a big-endian octet string.
    pub fn from_bytes_be(bytes: &[u8]) -> BigNat {
        let mut limbs = vec![0u32; bytes.len().div_ceil(4)];
        let mut idx = bytes.len();
        for limb in limbs.iter_mut() {
            let mut word = 0u32;
            for shift in [0u32, 8, 16, 24] {
                if idx == 0 {
                    break;
                }
                idx -= 1;
                word |= (bytes[idx] as u32) << shift;
            }
            *limb = word;
        }
        Self::from_limbs(limbs)
    }

    /// Decode a little-endian octet string.
    pub fn from_bytes_le(bytes: &[u8]) -> BigNat {
        let mut reversed = bytes.to_vec();
        reversed.reverse();
        Self::from_bytes_be(&reversed)
    }

    /// Parse a hex string; accepts an optional `0x`/`0X` prefix and mixed case.
    pub fn from_hex(s: &str) -> Result<BigNat, Error> {
        let s = s.trim();
        let rest = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidInput);
        }
        let padded = if rest.len() % 2 == 1 {
            format!("0{rest}")
        } else {
            String::from(rest)
        };
        let mut bytes = Vec::with_capacity(padded.len() / 2);
        let padded_bytes = padded.as_bytes();
        for chunk in padded_bytes.chunks(2) {
            let hi = (chunk[0] as char).to_digit(16).ok_or(Error::InvalidInput)?;
            let lo = (chunk[1] as char).to_digit(16).ok_or(Error::InvalidInput)?;
            bytes.push(((hi << 4) | lo) as u8);
        }
        Ok(Self::from_bytes_be(&bytes))
    }

    /// Lower-case hex digits, no separators, no `0x` prefix, no leading
    /// zero nibble (`"0"` for zero).
    pub fn to_hex(&self) -> String {
        if self.is_zero() {
            return String::from("0");
        }
        let nibbles = self.bit_length().div_ceil(4);
        let mut out = String::with_capacity(nibbles);
        for i in (0..nibbles).rev() {
            let shift = i * 4;
            let word = self.limbs.get(shift / 32).copied().unwrap_or(0);
            let nibble = (word >> (shift % 32)) & 0xF;
            out.push(core::char::from_digit(nibble, 16).expect("nibble < 16"));
        }
        out
    }

    /// Parse a decimal string (digits only, no sign, no separators).
    pub fn from_decimal(s: &str) -> Result<BigNat, Error> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidInput);
        }
        let ten = BigNat::from_u64(10);
        let mut value = BigNat::zero();
        for c in s.chars() {
            let digit = BigNat::from_u64(c.to_digit(10).expect("ascii digit") as u64);
            value = value.mul(&ten).add(&digit);
        }
        Ok(value)
    }

    /// Decimal digit string, no leading zeros (`"0"` for zero).
    pub fn to_decimal(&self) -> String {
        if self.is_zero() {
            return String::from("0");
        }
        let ten = BigNat::from_u64(10);
        let mut n = self.clone();
        let mut digits = Vec::new();
        while !n.is_zero() {
            let (q, r) = n.div_rem(&ten).expect("ten != 0");
            let digit = r.limbs.first().copied().unwrap_or(0);
            digits.push(core::char::from_digit(digit, 10).expect("digit < 10"));
            n = q;
        }
        digits.iter().rev().collect()
    }

    /// Draw a uniformly random value with exactly `bit_length` bits of
    /// entropy, clearing any bits above the requested length.
    pub fn random(bit_length: usize, rng: &mut impl RngCore) -> BigNat {
        if bit_length == 0 {
            return BigNat::zero();
        }
        let nbytes = bit_length.div_ceil(8);
        let mut bytes = vec![0u8; nbytes];
        rng.fill_bytes(&mut bytes);
        let excess_bits = nbytes * 8 - bit_length;
        if excess_bits > 0 {
            bytes[0] &= 0xFFu8 >> excess_bits;
        }
        Self::from_bytes_be(&bytes)
    }

    /// Draw a uniformly random value in `[lo, hi)` via rejection sampling.
    pub fn random_range(
        lo: &BigNat,
        hi: &BigNat,
        rng: &mut impl RngCore,
    ) -> Result<BigNat, Error> {
        if Self::cmp_magnitude(&hi.limbs, &lo.limbs) != Ordering::Greater {
            return Err(Error::InvalidInput);
        }
        let span = hi.sub(lo).expect("hi > lo");
        let bits = span.bit_length();
        loop {
            let candidate = Self::random(bits, rng);
            if Self::cmp_magnitude(&candidate.limbs, &span.limbs) == Ordering::Less {
                return Ok(lo.add(&candidate));
            }
        }
    }
}

impl Ord for BigNat {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::cmp_magnitude(&self.limbs, &other.limbs)
    }
}

impl PartialOrd for BigNat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for BigNat {
    fn from(value: u64) -> Self {
        BigNat::from_u64(value)
    }
}

impl From<u32> for BigNat {
    fn from(value: u32) -> Self {
        BigNat::from_u64(value as u64)
    }
}

/// Signed arbitrary-precision integer, used transiently by
/// [`BigNat::mod_inverse`]'s extended Euclidean algorithm.
///
/// Not part of this crate's public wire format — only [`BigNat`] is.
#[derive(Clone, Debug)]
pub(crate) struct Int {
    magnitude: BigNat,
    negative: bool,
}

impl Int {
    pub(crate) fn zero() -> Self {
        Int {
            magnitude: BigNat::zero(),
            negative: false,
        }
    }

    pub(crate) fn one() -> Self {
        Int {
            magnitude: BigNat::one(),
            negative: false,
        }
    }

    pub(crate) fn from_bignat(value: BigNat) -> Self {
        Int {
            magnitude: value,
            negative: false,
        }
    }

    fn normalize(mut self) -> Self {
        if self.magnitude.is_zero() {
            self.negative = false;
        }
        self
    }

    pub(crate) fn neg(&self) -> Self {
        Int {
            magnitude: self.magnitude.clone(),
            negative: !self.negative,
        }
        .normalize()
    }

    pub(crate) fn add(&self, other: &Int) -> Int {
        if self.negative == other.negative {
            return Int {
                magnitude: self.magnitude.add(&other.magnitude),
                negative: self.negative,
            }
            .normalize();
        }
        match self.magnitude.cmp(&other.magnitude) {
            Ordering::Equal => Int::zero(),
            Ordering::Greater => Int {
                magnitude: self.magnitude.sub(&other.magnitude).expect("greater"),
                negative: self.negative,
            }
            .normalize(),
            Ordering::Less => Int {
                magnitude: other.magnitude.sub(&self.magnitude).expect("greater"),
                negative: other.negative,
            }
            .normalize(),
        }
    }

    pub(crate) fn sub(&self, other: &Int) -> Int {
        self.add(&other.neg())
    }

    pub(crate) fn mul(&self, other: &Int) -> Int {
        Int {
            magnitude: self.magnitude.mul(&other.magnitude),
            negative: self.negative != other.negative,
        }
        .normalize()
    }

    /// Reduce into `[0, modulus)`.
    pub(crate) fn rem_euclid(&self, modulus: &BigNat) -> BigNat {
        let r = self.magnitude.rem(modulus).unwrap_or_else(|_| BigNat::zero());
        if self.negative && !r.is_zero() {
            modulus.sub(&r).expect("r < modulus")
        } else {
            r
        }
    }
}
