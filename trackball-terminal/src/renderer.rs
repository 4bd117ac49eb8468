/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix3, Matrix4, Vector3};
use std::io::Write;
use trackball_core::{Camera, Mesh, PhongLight, Transform, Triangle};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, `None` outside the buffer
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        light: &PhongLight,
    ) {
        let shading = Shading {
            normal_matrix: Transform::normal_matrix(model_matrix),
            to_eye: camera.eye_direction(),
            light,
        };
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera, &shading);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        shading: &Shading<'_>,
    ) {
        // Project vertices to screen space; drop the triangle if any is clipped
        let projected: Option<Vec<(f32, f32, f32)>> = triangle
            .vertices
            .iter()
            .map(|vertex| {
                camera.project_to_screen(
                    &vertex.position,
                    model_matrix,
                    self.width as u32,
                    self.height as u32,
                )
            })
            .collect();
        let Some(screen_coords) = projected else {
            return;
        };

        // Face normal in world space for Phong shading
        let normal = (shading.normal_matrix * triangle.shading_normal())
            .try_normalize(1e-6)
            .unwrap_or_else(|| triangle.shading_normal());
        let brightness = shading.light.intensity(&normal, &shading.to_eye);
        let character = luminosity_char(brightness);

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                        }
                    }
                }
            }
        }
    }

    /// Write the frame row by row, batching runs of equally colored cells
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (y, row) in self.char_buffer.chunks(self.width.max(1)).enumerate() {
            writer.queue(MoveTo(0, y as u16))?;

            let mut run = String::with_capacity(self.width);
            let mut run_color = None;
            for &c in row {
                let color = cell_color(c);
                if run_color != Some(color) {
                    if let Some(previous) = run_color {
                        writer.queue(SetForegroundColor(previous))?;
                        writer.queue(Print(&run))?;
                        run.clear();
                    }
                    run_color = Some(color);
                }
                run.push(c);
            }
            if let Some(color) = run_color {
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(&run))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Color based on character intensity
fn cell_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Per-frame values shared by every triangle of a mesh
struct Shading<'a> {
    normal_matrix: Matrix3<f32>,
    to_eye: Vector3<f32>,
    light: &'a PhongLight,
}

/// Map a brightness in `[0, 1]` to a character of the ramp.
/// Lit faces never use the blank character so they stay visible.
fn luminosity_char(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.clamp(1, last)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::UnitQuaternion;
    use std::f32::consts::PI;

    fn filled_cells(renderer: &AsciiRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.cell(x, y) != Some(' '))
            .count()
    }

    #[test]
    fn test_luminosity_char_bounds() {
        assert_eq!(luminosity_char(0.0), '.');
        assert_eq!(luminosity_char(1.0), '@');
        assert_eq!(luminosity_char(7.0), '@');
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut renderer = AsciiRenderer::new(20, 6);
        let camera = Camera::with_aspect(20.0 / 12.0);
        let model = Transform::rotation_matrix(&UnitQuaternion::identity());
        renderer.render_mesh(&Mesh::quad(2.0), &model, &camera, &PhongLight::default());

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains('\n'));
        assert!(text.contains('@') || text.contains('%') || text.contains('#'));
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_renders_cube() {
        let mut renderer = AsciiRenderer::new(80, 40);
        let camera = Camera::with_aspect(1.0);
        let model = Transform::rotation_matrix(&UnitQuaternion::identity());
        renderer.render_mesh(&Mesh::cube(2.0), &model, &camera, &PhongLight::default());
        assert!(filled_cells(&renderer) > 0);
        // The cube faces the viewer, so the center cell is covered
        assert_ne!(renderer.cell(40, 20), Some(' '));

        renderer.clear();
        assert_eq!(filled_cells(&renderer), 0);
    }

    #[test]
    fn test_rotated_quad_edge_on_is_thin() {
        let camera = Camera::with_aspect(1.0);
        let light = PhongLight::default();

        let mut facing = AsciiRenderer::new(60, 60);
        let identity = Transform::rotation_matrix(&UnitQuaternion::identity());
        facing.render_mesh(&Mesh::quad(2.0), &identity, &camera, &light);

        let mut edge_on = AsciiRenderer::new(60, 60);
        let quarter = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.0);
        edge_on.render_mesh(&Mesh::quad(2.0), &Transform::rotation_matrix(&quarter), &camera, &light);

        assert!(filled_cells(&edge_on) < filled_cells(&facing));
    }
}
