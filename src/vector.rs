use std::ops::{ Add, AddAssign, Sub, SubAssign, Neg, Mul, MulAssign };

use num_traits::{ Float, Num };

/// A three component vector.
///
/// The element type is either an integer (color channels, see `color::Rgb`)
/// or a float (points and directions, see `Vec3`). Equality is exact and
/// component-wise; use `is_close` to compare floating point vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// A point or direction in scene space.
pub type Vec3 = Vector<f64>;

impl<T> Vector<T> {
    pub const fn new(x: T, y: T, z: T) -> Vector<T> {
        Vector { x, y, z }
    }
}

impl<T: Num + Copy> Vector<T> {
    /// The additive identity.
    pub fn zeros() -> Vector<T> {
        Vector::new(T::zero(), T::zero(), T::zero())
    }

    pub fn dot(&self, other: &Vector<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product. Swapping the operands negates the result.
    pub fn cross(&self, other: &Vector<T>) -> Vector<T> {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<T: Float> Vector<T> {
    /// The Euclidean norm.
    pub fn length(&self) -> T {
        self.dot(self).sqrt()
    }

    /// Divides the vector by its own length.
    ///
    /// The vector must not be zero; a zero vector yields non-finite
    /// components.
    pub fn normalized(&self) -> Vector<T> {
        let len = self.length();

        Vector {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }
}

pub fn dot<T: Num + Copy>(first: &Vector<T>, second: &Vector<T>) -> T {
    first.dot(second)
}

pub fn cross<T: Num + Copy>(first: &Vector<T>, second: &Vector<T>) -> Vector<T> {
    first.cross(second)
}

/// Checks whether two vectors are closer than `tolerance` to each other.
///
/// # Examples
///
/// ```
/// # use mirror_tracer::vector::{ Vec3, is_close };
/// let a = Vec3::new(1.0, 0.0, 0.0);
/// let b = Vec3::new(1.0, 1e-9, 0.0);
/// assert!(is_close(&a, &b, 1e-7));
/// assert!(!is_close(&a, &b, 1e-10));
/// ```
pub fn is_close<T: Float>(first: &Vector<T>, second: &Vector<T>, tolerance: T)
    -> bool {
    (*first - *second).length() < tolerance
}

impl<T> From<[T; 3]> for Vector<T> {
    fn from(v: [T; 3]) -> Vector<T> {
        let [x, y, z] = v;
        Vector { x, y, z }
    }
}

impl<T: Num + Copy> Add for Vector<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Num + Copy> AddAssign for Vector<T> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<T: Num + Copy> Sub for Vector<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl<T: Num + Copy> SubAssign for Vector<T> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<T: Num + Copy + Neg<Output = T>> Neg for Vector<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use mirror_tracer::vector::Vec3;
///
/// let v = Vec3::new(1.0, -2.0, 3.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(v * 2.0, Vec3::new(2.0, -4.0, 6.0));
/// ```
impl<T: Num + Copy> Mul<T> for Vector<T> {
    type Output = Self;

    fn mul(self, other: T) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, other: T) {
        *self = *self * other;
    }
}

/// Implements scalar left-multiplication for vectors of primitive numbers.
///
/// ```
/// use mirror_tracer::vector::Vec3;
///
/// let v = Vec3::new(1.0, -2.0, 3.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(0.5 * v, Vec3::new(0.5, -1.0, 1.5));
/// ```
macro_rules! impl_scalar_left_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<Vector<$t>> for $t {
                type Output = Vector<$t>;

                fn mul(self, other: Vector<$t>) -> Vector<$t> {
                    other * self
                }
            }
        )*
    };
}

impl_scalar_left_mul!(f32, f64, i32, i64);

/* Tests */

#[test]
fn initialize_vector() {
    let v: Vector<i32> = Vector::new(1, 2, 3);

    assert_eq!(v.x, 1);
    assert_eq!(v.y, 2);
    assert_eq!(v.z, 3);
}

#[test]
fn exact_equality() {
    let first: Vector<i32> = Vector::new(1, 0, 0);
    let first_equal: Vector<i32> = Vector::new(1, 0, 0);
    let second: Vector<i32> = Vector::new(0, 1, 0);

    assert_eq!(first, first_equal);
    assert!(!(first != first_equal));
    assert_ne!(first, second);

    // No tolerance for `==`
    assert_ne!(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0 + 1e-12, 0.0, 0.0));
}

#[test]
fn add_and_sub_vectors() {
    let a = Vec3::new(3.0, -2.0, 5.0);
    let b = Vec3::new(-2.0, 3.0, 1.0);

    assert_eq!(a + b, Vec3::new(1.0, 1.0, 6.0));
    assert_eq!(a - b, Vec3::new(5.0, -5.0, 4.0));
    assert_eq!(-a, Vec3::new(-3.0, 2.0, -5.0));
}

#[test]
fn accumulating_operators() {
    let mut v: Vector<i32> = Vector::new(1, 2, 3);
    v += Vector::new(1, 1, 1);
    assert_eq!(v, Vector::new(2, 3, 4));

    v -= Vector::new(2, 2, 2);
    assert_eq!(v, Vector::new(0, 1, 2));

    v *= 3;
    assert_eq!(v, Vector::new(0, 3, 6));
}

#[test]
fn scalar_multiplication_both_sides() {
    let v: Vector<i32> = Vector::new(1, -2, 3);

    assert_eq!(v * 3, Vector::new(3, -6, 9));
    assert_eq!(3 * v, v * 3);
}

#[test]
fn zeros_is_additive_identity() {
    let v = Vec3::new(1.5, -2.0, 7.0);

    assert_eq!(v + Vec3::zeros(), v);
    assert_eq!(Vec3::zeros(), Vec3::new(0.0, 0.0, 0.0));
}

#[test]
fn dot_is_symmetric() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
    assert_eq!(dot(&a, &b), dot(&b, &a));
}

#[test]
fn cross_is_anticommutative() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Vec3::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Vec3::new(1.0, -2.0, 1.0));
    assert_eq!(cross(&a, &b), -cross(&b, &a));
}

#[test]
fn cross_of_axes() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn length_of_vector() {
    assert_eq!(Vec3::new(1.0, 2.0, 3.0).length(), f64::sqrt(14.0));
    assert_eq!(Vec3::new(-1.0, -2.0, -3.0).length(), f64::sqrt(14.0));
    assert_eq!(Vec3::zeros().length(), 0.0);
}

#[test]
fn normalized_has_unit_length() {
    let vectors = [
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-0.001, 250.0, 3.5),
    ];

    for v in vectors.iter() {
        assert!((v.normalized().length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn normalize_is_idempotent() {
    let once = Vec3::new(1.0, 2.0, 3.0).normalized();
    let twice = once.normalized();

    assert!(is_close(&once, &twice, 1e-12));
}

#[test]
fn normalize_zero_is_not_finite() {
    let n = Vec3::zeros().normalized();

    assert!(!n.x.is_finite());
}

#[test]
fn is_close_uses_strict_bound() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(0.5, 0.0, 0.0);

    assert!(!is_close(&a, &b, 0.5));
    assert!(is_close(&a, &b, 0.5001));
}

#[test]
fn vector_from_array() {
    let v: Vec3 = [1.0, 2.0, 3.0].into();

    assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
}
