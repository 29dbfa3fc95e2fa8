//! The elliptic-curve group: point representation and the group law (layer L2).

use crate::bignat::BigNat;
use crate::field;

/// A point on a short-Weierstrass curve `y^2 = x^3 + a*x + b (mod p)`.
///
/// `Identity` is the group's neutral element ("point at infinity");
/// `Affine` carries both coordinates in `[0, p)`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AffinePoint {
    /// The neutral element.
    Identity,
    /// A finite point `(x, y)`.
    Affine {
        /// x-coordinate, in `[0, p)`.
        x: BigNat,
        /// y-coordinate, in `[0, p)`.
        y: BigNat,
    },
}

impl AffinePoint {
    /// Construct a finite point from its coordinates.
    pub fn new(x: BigNat, y: BigNat) -> Self {
        AffinePoint::Affine { x, y }
    }

    /// `true` iff this is the group identity.
    pub fn is_identity(&self) -> bool {
        matches!(self, AffinePoint::Identity)
    }

    /// Borrow the coordinates, if this is a finite point.
    pub fn coordinates(&self) -> Option<(&BigNat, &BigNat)> {
        match self {
            AffinePoint::Identity => None,
            AffinePoint::Affine { x, y } => Some((x, y)),
        }
    }
}

/// Immutable domain parameters for a short-Weierstrass curve of prime order
/// and cofactor 1.
#[derive(Clone, Debug)]
pub struct CurveParams {
    /// Field prime.
    pub p: BigNat,
    /// Curve coefficient `a`.
    pub a: BigNat,
    /// Curve coefficient `b`.
    pub b: BigNat,
    /// Generator point.
    pub g: AffinePoint,
    /// Order of the group generated by `g`.
    pub n: BigNat,
    /// Cofactor (1 for every curve this crate supports).
    pub h: u32,
    /// Human-readable curve name.
    pub name: &'static str,
}

impl CurveParams {
    /// NIST P-256 (a.k.a. secp256r1 / prime256v1) domain parameters.
    pub fn secp256r1() -> Self {
        let p =
            BigNat::from_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff")
                .expect("valid constant");
        let a = p.sub(&BigNat::from_u64(3)).expect("p > 3");
        let b = BigNat::from_hex(
            "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
        )
        .expect("valid constant");
        let gx = BigNat::from_hex(
            "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
        )
        .expect("valid constant");
        let gy = BigNat::from_hex(
            "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
        )
        .expect("valid constant");
        let n =
            BigNat::from_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
                .expect("valid constant");
        CurveParams {
            p,
            a,
            b,
            g: AffinePoint::new(gx, gy),
            n,
            h: 1,
            name: "secp256r1",
        }
    }

    /// `true` iff `point` is the identity, or satisfies the curve equation
    /// with both coordinates in `[0, p)`.
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        let (x, y) = match point.coordinates() {
            None => return true,
            Some(xy) => xy,
        };
        if x >= &self.p || y >= &self.p {
            return false;
        }
        let lhs = field::mul(y, y, &self.p);
        let x2 = field::mul(x, x, &self.p);
        let x3 = field::mul(&x2, x, &self.p);
        let ax = field::mul(&self.a, x, &self.p);
        let rhs = field::add(&field::add(&x3, &ax, &self.p), &self.b, &self.p);
        lhs == rhs
    }

    /// `-P`.
    pub fn negate(&self, point: &AffinePoint) -> AffinePoint {
        match point {
            AffinePoint::Identity => AffinePoint::Identity,
            AffinePoint::Affine { x, y } => {
                let neg_y = if y.is_zero() {
                    BigNat::zero()
                } else {
                    self.p.sub(y).expect("y < p")
                };
                AffinePoint::new(x.clone(), neg_y)
            }
        }
    }

    /// `P + Q`, via chord-and-tangent addition.
    pub fn add(&self, p: &AffinePoint, q: &AffinePoint) -> AffinePoint {
        let (x1, y1) = match p.coordinates() {
            None => return q.clone(),
            Some(xy) => xy,
        };
        let (x2, y2) = match q.coordinates() {
            None => return p.clone(),
            Some(xy) => xy,
        };
        if x1 == x2 {
            if field::add(y1, y2, &self.p).is_zero() {
                return AffinePoint::Identity;
            }
            return self.double(p);
        }
        let num = field::sub(y2, y1, &self.p);
        let den = field::sub(x2, x1, &self.p);
        let lambda = field::div(&num, &den, &self.p).expect("x1 != x2 so den != 0");
        let x3 = field::sub(
            &field::sub(&field::mul(&lambda, &lambda, &self.p), x1, &self.p),
            x2,
            &self.p,
        );
        let y3 = field::sub(&field::mul(&lambda, &field::sub(x1, &x3, &self.p), &self.p), y1, &self.p);
        AffinePoint::new(x3, y3)
    }

    /// `2P`.
    pub fn double(&self, p: &AffinePoint) -> AffinePoint {
        let (x, y) = match p.coordinates() {
            None => return AffinePoint::Identity,
            Some(xy) => xy,
        };
        if y.is_zero() {
            return AffinePoint::Identity;
        }
        let three_x2 = field::mul(&BigNat::from_u64(3), &field::mul(x, x, &self.p), &self.p);
        let num = field::add(&three_x2, &self.a, &self.p);
        let den = field::mul(&BigNat::two(), y, &self.p);
        let lambda = field::div(&num, &den, &self.p).expect("y != 0 so den != 0");
        let x3 = field::sub(&field::sub(&field::mul(&lambda, &lambda, &self.p), x, &self.p), x, &self.p);
        let y3 = field::sub(&field::mul(&lambda, &field::sub(x, &x3, &self.p), &self.p), y, &self.p);
        AffinePoint::new(x3, y3)
    }

    /// `k*P`, via a fixed-iteration Montgomery ladder: one `add` and one
    /// `double` happen on every bit of the group order regardless of the
    /// scalar's bits, so the operation sequence does not itself leak `k`'s
    /// Hamming weight or length (see the module's constant-time discussion).
    ///
    /// `k` is reduced modulo `n` first, as required when `k` may be `>= n`.
    pub fn scalar_mul(&self, k: &BigNat, point: &AffinePoint) -> AffinePoint {
        let k = k.rem(&self.n).expect("n != 0");
        let bits = self.n.bit_length().max(1);
        let mut r0 = AffinePoint::Identity;
        let mut r1 = point.clone();
        for i in (0..bits).rev() {
            if k.get_bit(i) {
                r0 = self.add(&r0, &r1);
                r1 = self.double(&r1);
            } else {
                r1 = self.add(&r0, &r1);
                r0 = self.double(&r0);
            }
        }
        r0
    }

    /// `k*G`.
    pub fn scalar_mul_base(&self, k: &BigNat) -> AffinePoint {
        self.scalar_mul(k, &self.g)
    }
}
