use foundation::math::Vec3;
use scene::mobius::MobiusGrid;

/// CPU-side buffers for the strip, shared by all three layers.
///
/// The edge layer indexes the same vertices as the triangles, so the
/// geometry is uploaded once.
#[derive(Debug, Clone)]
pub struct StripBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub triangle_indices: Vec<u32>,
    /// Line-list pairs tracing the (u, v) grid.
    pub edge_indices: Vec<u32>,
}

pub fn tessellate_strip(grid: &MobiusGrid) -> StripBuffers {
    let u_segments = grid.u_segments;
    let v_segments = grid.v_segments;
    let stride = v_segments + 1;

    let positions: Vec<[f32; 3]> = grid
        .positions
        .iter()
        .map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect();

    let mut triangle_indices =
        Vec::with_capacity((u_segments * v_segments * 6) as usize);
    for iu in 0..u_segments {
        for iv in 0..v_segments {
            let i0 = iu * stride + iv;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;

            triangle_indices.push(i0);
            triangle_indices.push(i2);
            triangle_indices.push(i1);
            triangle_indices.push(i1);
            triangle_indices.push(i2);
            triangle_indices.push(i3);
        }
    }

    // Accumulated face normals, normalized per vertex. The surface is
    // one-sided, so normal sense flips across the seam; the surface is drawn
    // double-sided and the shader takes abs() of the lambert term.
    let mut accum = vec![Vec3::zero(); grid.positions.len()];
    for tri in triangle_indices.chunks_exact(3) {
        let a = grid.positions[tri[0] as usize];
        let b = grid.positions[tri[1] as usize];
        let c = grid.positions[tri[2] as usize];
        let n = (b - a).cross(c - a);
        for &i in tri {
            accum[i as usize] = accum[i as usize] + n;
        }
    }
    let normals: Vec<[f32; 3]> = accum
        .into_iter()
        .map(|n| {
            let n = n.normalize();
            [n.x as f32, n.y as f32, n.z as f32]
        })
        .collect();

    let mut edge_indices = Vec::new();
    // The last column coincides with column 0 in space (half-twist seam), so
    // cross edges stop one column short to keep the seam from drawing twice.
    for iu in 0..u_segments {
        for iv in 0..v_segments {
            edge_indices.push(iu * stride + iv);
            edge_indices.push(iu * stride + iv + 1);
        }
    }
    for iu in 0..u_segments {
        for iv in 0..=v_segments {
            edge_indices.push(iu * stride + iv);
            edge_indices.push((iu + 1) * stride + iv);
        }
    }

    StripBuffers {
        positions,
        normals,
        triangle_indices,
        edge_indices,
    }
}

#[cfg(test)]
mod tests {
    use super::tessellate_strip;
    use scene::mobius::MobiusGrid;

    #[test]
    fn buffer_counts_match_the_grid() {
        let grid = MobiusGrid::generate();
        let buffers = tessellate_strip(&grid);

        assert_eq!(buffers.positions.len(), 121 * 31);
        assert_eq!(buffers.normals.len(), buffers.positions.len());
        assert_eq!(buffers.triangle_indices.len(), (120 * 30 * 6) as usize);
        // Cross-strip edges (seam column emitted once) plus longitudinal
        // edges.
        assert_eq!(
            buffers.edge_indices.len(),
            2 * (120 * 30 + 120 * 31) as usize
        );
    }

    #[test]
    fn indices_stay_in_bounds() {
        let grid = MobiusGrid::with_resolution(16, 4);
        let buffers = tessellate_strip(&grid);
        let n = buffers.positions.len() as u32;
        assert!(buffers.triangle_indices.iter().all(|&i| i < n));
        assert!(buffers.edge_indices.iter().all(|&i| i < n));
    }

    #[test]
    fn no_edge_is_drawn_twice() {
        // The seam columns share positions; emitting cross edges for both
        // would render the seam double-bright under alpha blending.
        let grid = MobiusGrid::with_resolution(20, 5);
        let buffers = tessellate_strip(&grid);

        let quantize = |p: [f32; 3]| {
            (
                (p[0] * 1e4).round() as i64,
                (p[1] * 1e4).round() as i64,
                (p[2] * 1e4).round() as i64,
            )
        };

        let mut seen = std::collections::HashSet::new();
        for pair in buffers.edge_indices.chunks_exact(2) {
            let a = quantize(buffers.positions[pair[0] as usize]);
            let b = quantize(buffers.positions[pair[1] as usize]);
            let key = if a <= b { (a, b) } else { (b, a) };
            assert!(seen.insert(key), "duplicate edge at {key:?}");
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let buffers = tessellate_strip(&MobiusGrid::with_resolution(24, 6));
        for n in &buffers.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-3, "normal length {len}");
        }
    }
}
