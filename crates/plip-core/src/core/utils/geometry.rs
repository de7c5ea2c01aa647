use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GeometryError {
    #[error("Coordinates must be {expected}-dimensional, got {found} component(s)")]
    Dimension { expected: usize, found: usize },
}

pub fn point_from_slice(coords: &[f64]) -> Result<Point3<f64>, GeometryError> {
    match coords {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(GeometryError::Dimension {
            expected: 3,
            found: coords.len(),
        }),
    }
}

#[inline]
pub fn euclidean3d(p: &Point3<f64>, q: &Point3<f64>) -> f64 {
    (p - q).norm()
}

pub fn try_euclidean3d(p: &[f64], q: &[f64]) -> Result<f64, GeometryError> {
    Ok(euclidean3d(&point_from_slice(p)?, &point_from_slice(q)?))
}

#[inline]
pub fn vector(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    to - from
}

// Identical vectors short-circuit to 0 so acos never sees a cosine past 1.
pub fn vecangle(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    if v1 == v2 {
        return 0.0;
    }
    let cosine = v1.dot(v2) / (v1.norm() * v2.norm());
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

// NaN passes through.
#[inline]
pub fn fold_angle(angle_degrees: f64) -> f64 {
    let folded = angle_degrees.min(180.0 - angle_degrees);
    if folded < 0.0 { 0.0 } else { folded }
}

pub fn normalize_vector(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm == 0.0 { *v } else { v / norm }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

// The normal is flipped towards `target` before projecting.
pub fn projection(
    normal: &Vector3<f64>,
    plane_point: &Point3<f64>,
    target: &Point3<f64>,
) -> Point3<f64> {
    let flipped = -normal;
    let d1 = euclidean3d(target, &(plane_point + normal));
    let d2 = euclidean3d(target, &(plane_point + flipped));
    let n = if d1 < d2 { *normal } else { flipped };

    let sn = -n.dot(&vector(plane_point, target));
    let sd = n.dot(&n);
    target + n * (sn / sd)
}
