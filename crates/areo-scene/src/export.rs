//! Wavefront OBJ export of a built scene.
//!
//! Each layer becomes an object with positions, normals, UVs and triangle
//! faces in its current orientation; each wave path becomes a polyline
//! object using its displayed points.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::context::SceneContext;
use crate::error::SceneError;

/// Counts of what was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjStats {
    pub objects: usize,
    pub vertices: usize,
    pub faces: usize,
    pub lines: usize,
}

fn object_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Write every layer and wave path of `ctx` to `out` as OBJ text.
pub fn write_obj(ctx: &SceneContext, mut out: impl Write) -> io::Result<ObjStats> {
    let mut stats = ObjStats::default();
    writeln!(out, "# scene {}", ctx.name())?;

    // OBJ indices are 1-based and global across objects.
    let mut base = 1usize;
    for layer in ctx.layers() {
        let geometry = layer.world_geometry();
        writeln!(out, "o {}", object_name(&layer.name))?;
        for p in &geometry.positions {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for n in &geometry.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for uv in &geometry.uvs {
            writeln!(out, "vt {} {}", uv[0], uv[1])?;
        }
        for tri in geometry.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize + base);
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
            stats.faces += 1;
        }
        base += geometry.vertex_count();
        stats.vertices += geometry.vertex_count();
        stats.objects += 1;
    }

    for (i, line) in ctx.waves().iter().enumerate() {
        let points = line.wave.display_points();
        writeln!(out, "o wave_{}_{i}", line.wave.kind())?;
        for p in points {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        if points.len() >= 2 {
            write!(out, "l")?;
            for j in 0..points.len() {
                write!(out, " {}", base + j)?;
            }
            writeln!(out)?;
            stats.lines += 1;
        }
        base += points.len();
        stats.vertices += points.len();
        stats.objects += 1;
    }

    out.flush()?;
    Ok(stats)
}

/// Write the scene to `path` as OBJ.
pub fn save_obj(ctx: &SceneContext, path: impl AsRef<Path>) -> Result<ObjStats, SceneError> {
    let path = path.as_ref();
    let io_error = |source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let stats = write_obj(ctx, BufWriter::new(file)).map_err(io_error)?;
    info!(
        "Exported {} objects ({} vertices, {} faces, {} lines) to {}",
        stats.objects,
        stats.vertices,
        stats.faces,
        stats.lines,
        path.display()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextOptions;
    use crate::description::SceneDescription;
    use areo_config::SceneVariant;
    use areo_mesh::Tessellation;

    fn export(variant: SceneVariant) -> (ObjStats, String) {
        let options = ContextOptions {
            tessellation: Tessellation::new(8, 4),
            ..ContextOptions::default()
        };
        let ctx = SceneContext::new(&SceneDescription::preset(variant), options).unwrap();
        let mut buf = Vec::new();
        let stats = write_obj(&ctx, &mut buf).unwrap();
        (stats, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_counts_match_output() {
        let (stats, text) = export(SceneVariant::SeismicHemisphere);
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("o "), stats.objects);
        assert_eq!(count("v "), stats.vertices);
        assert_eq!(count("f "), stats.faces);
        assert_eq!(count("l "), stats.lines);
        assert_eq!(stats.lines, 22);
        // shell, three discs, base, and one object per wave path
        assert_eq!(stats.objects, 5 + 22);
    }

    #[test]
    fn test_indices_stay_in_range() {
        let (stats, text) = export(SceneVariant::CutawaySphere);
        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for corner in line.split_whitespace().skip(1) {
                let index: usize = corner.split('/').next().unwrap().parse().unwrap();
                assert!(index >= 1 && index <= stats.vertices);
            }
        }
        assert_eq!(stats.lines, 0);
    }

    #[test]
    fn test_object_names_are_sanitised() {
        let (_, text) = export(SceneVariant::LayeredSpheres);
        assert!(text.contains("o s_wave_shadow_zone"));
        assert!(text.lines().filter(|l| l.starts_with("o ")).all(|l| !l[2..].contains(' ')));
    }

    #[test]
    fn test_save_obj_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = SceneContext::new(
            &SceneDescription::preset(SceneVariant::CrossSection),
            ContextOptions::default(),
        )
        .unwrap();
        let path = dir.path().join("scene.obj");
        let stats = save_obj(&ctx, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("o ")).count(), stats.objects);

        let missing = dir.path().join("no/such/dir/scene.obj");
        assert!(matches!(save_obj(&ctx, missing), Err(SceneError::Io { .. })));
    }
}
