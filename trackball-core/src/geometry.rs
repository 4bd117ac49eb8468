/// Geometry primitives for 3D rendering
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Average of the stored vertex normals, normalized.
    ///
    /// Falls back to the winding-order normal when the stored normals cancel out.
    pub fn shading_normal(&self) -> Vector3<f32> {
        let sum: Vector3<f32> = self.vertices.iter().map(|v| v.normal).sum();
        sum.try_normalize(1e-6)
            .unwrap_or_else(|| self.calculate_normal())
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;
        
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        
        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Build a mesh from vertices laid out as a triangle strip. Every other
    /// triangle has its first two vertices swapped to keep winding consistent.
    pub fn from_triangle_strip(vertices: &[Vertex]) -> Self {
        let mut mesh = Self::with_capacity(vertices.len().saturating_sub(2));
        for (i, window) in vertices.windows(3).enumerate() {
            let triangle = if i % 2 == 0 {
                Triangle::new(window[0], window[1], window[2])
            } else {
                Triangle::new(window[1], window[0], window[2])
            };
            mesh.add_triangle(triangle);
        }
        mesh
    }

    /// Build the mesh for a named shape
    pub fn from_shape(shape: Shape, size: f32) -> Self {
        match shape {
            Shape::Triangle => Self::triangle(size),
            Shape::Quad => Self::quad(size),
            Shape::Cube => Self::cube(size),
        }
    }

    /// A single triangle facing +z
    pub fn triangle(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(half, -half, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(0.0, half, 0.0, 0.0, 0.0, 1.0),
        ));
        mesh
    }

    /// A square facing +z, drawn as a four-vertex triangle strip
    pub fn quad(size: f32) -> Self {
        let half = size / 2.0;
        Self::from_triangle_strip(&[
            Vertex::new(-half, -half, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(half, -half, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(-half, half, 0.0, 0.0, 0.0, 1.0),
            Vertex::new(half, half, 0.0, 0.0, 0.0, 1.0),
        ])
    }

    /// Create a simple cube mesh for testing
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // Front face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, half, half, 0.0, 0.0, 1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, half, 0.0, 0.0, 1.0),
            Vertex::new(half, half, half, 0.0, 0.0, 1.0),
            Vertex::new(-half, half, half, 0.0, 0.0, 1.0),
        ));

        // Back face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, 0.0, -1.0),
            Vertex::new(-half, half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, half, -half, 0.0, 0.0, -1.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, half, -half, 0.0, 0.0, -1.0),
            Vertex::new(half, -half, -half, 0.0, 0.0, -1.0),
        ));

        // Top face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, half, -half, 0.0, 1.0, 0.0),
            Vertex::new(-half, half, half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, half, 0.0, 1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, half, -half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, half, 0.0, 1.0, 0.0),
            Vertex::new(half, half, -half, 0.0, 1.0, 0.0),
        ));

        // Bottom face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, half, 0.0, -1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, 0.0, -1.0, 0.0),
            Vertex::new(half, -half, half, 0.0, -1.0, 0.0),
            Vertex::new(-half, -half, half, 0.0, -1.0, 0.0),
        ));

        // Right face
        mesh.add_triangle(Triangle::new(
            Vertex::new(half, -half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, half, 1.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(half, -half, -half, 1.0, 0.0, 0.0),
            Vertex::new(half, half, half, 1.0, 0.0, 0.0),
            Vertex::new(half, -half, half, 1.0, 0.0, 0.0),
        ));

        // Left face
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, -1.0, 0.0, 0.0),
            Vertex::new(-half, -half, half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, half, -1.0, 0.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            Vertex::new(-half, -half, -half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, half, -1.0, 0.0, 0.0),
            Vertex::new(-half, half, -half, -1.0, 0.0, 0.0),
        ));

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// The shapes the viewer can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Triangle,
    Quad,
    #[default]
    Cube,
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" => Ok(Shape::Triangle),
            "quad" => Ok(Shape::Quad),
            "cube" => Ok(Shape::Cube),
            other => Err(format!("unknown shape '{other}' (expected triangle, quad or cube)")),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Triangle => "triangle",
            Shape::Quad => "quad",
            Shape::Cube => "cube",
        };
        f.write_str(name)
    }
}
