//! Row-wise frame traversal
//!
//! Stages write a fresh output buffer one row at a time. Rows never read
//! each other, so the parallel and sequential paths produce identical bytes.

#[cfg(feature = "multi-thread")]
use rayon::prelude::*;

/// Calls `f(row, src_row, dst_row)` for every row of `src` / `dst`.
pub(crate) fn map_rows<S, D, F>(src: &[S], src_stride: usize, dst: &mut [D], dst_stride: usize, f: F)
where
    S: Sync,
    D: Send,
    F: Fn(usize, &[S], &mut [D]) + Sync + Send,
{
    #[cfg(feature = "multi-thread")]
    dst.par_chunks_mut(dst_stride)
        .zip(src.par_chunks(src_stride))
        .enumerate()
        .for_each(|(row, (dst_row, src_row))| f(row, src_row, dst_row));

    #[cfg(not(feature = "multi-thread"))]
    for (row, (dst_row, src_row)) in dst.chunks_mut(dst_stride).zip(src.chunks(src_stride)).enumerate() {
        f(row, src_row, dst_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_rows_passes_row_index() {
        let src: Vec<u16> = (0..12).collect();
        let mut dst = vec![0u32; 6];
        map_rows(&src, 4, &mut dst, 2, |row, s, d| {
            d[0] = row as u32;
            d[1] = s.iter().map(|&v| v as u32).sum();
        });
        assert_eq!(dst, vec![0, 6, 1, 22, 2, 38]);
    }
}
