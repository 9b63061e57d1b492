//! Elementwise kernels over aligned parameter-sized buffers.
//!
//! Each kernel applies a pure per-index closure to every position of its buffers, indices are
//! independent of each other so the work is split across the rayon thread pool. The last buffer
//! is always the read-only gradient.

use rayon::prelude::*;

/// Minimum amount of elements handled by a single rayon task.
pub(crate) const MIN_CHUNK: usize = 4096;

/// Applies `f` to every `(a[i], g[i])` pair.
pub fn zip2<F>(a: &mut [f32], g: &[f32], f: F)
where
    F: Fn(&mut f32, f32) + Sync + Send,
{
    debug_assert_eq!(a.len(), g.len());

    a.par_iter_mut()
        .zip(g.par_iter())
        .with_min_len(MIN_CHUNK)
        .for_each(|(a, &g)| f(a, g));
}

/// Applies `f` to every `(a[i], b[i], g[i])` triple.
pub fn zip3<F>(a: &mut [f32], b: &mut [f32], g: &[f32], f: F)
where
    F: Fn(&mut f32, &mut f32, f32) + Sync + Send,
{
    debug_assert_eq!(a.len(), g.len());
    debug_assert_eq!(b.len(), g.len());

    a.par_iter_mut()
        .zip(b.par_iter_mut())
        .zip(g.par_iter())
        .with_min_len(MIN_CHUNK)
        .for_each(|((a, b), &g)| f(a, b, g));
}

/// Applies `f` to every `(a[i], b[i], c[i], g[i])` quadruple.
pub fn zip4<F>(a: &mut [f32], b: &mut [f32], c: &mut [f32], g: &[f32], f: F)
where
    F: Fn(&mut f32, &mut f32, &mut f32, f32) + Sync + Send,
{
    debug_assert_eq!(a.len(), g.len());
    debug_assert_eq!(b.len(), g.len());
    debug_assert_eq!(c.len(), g.len());

    a.par_iter_mut()
        .zip(b.par_iter_mut())
        .zip(c.par_iter_mut())
        .zip(g.par_iter())
        .with_min_len(MIN_CHUNK)
        .for_each(|(((a, b), c), &g)| f(a, b, c, g));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip2_visits_every_index() {
        const LEN: usize = 3 * MIN_CHUNK + 7;

        let mut a = vec![1.0; LEN];
        let g: Vec<f32> = (0..LEN).map(|i| i as f32).collect();

        zip2(&mut a, &g, |a, g| *a += g);

        for (i, &a) in a.iter().enumerate() {
            assert_eq!(a, 1.0 + i as f32, "mismatch at index {i}");
        }
    }

    #[test]
    fn test_zip3_orders_within_an_element() {
        let mut a = [0.0; 4];
        let mut b = [1.0; 4];
        let g = [1.0, 2.0, 3.0, 4.0];

        zip3(&mut a, &mut b, &g, |a, b, g| {
            *b += g;
            *a = *b * 10.0;
        });

        assert_eq!(b, [2.0, 3.0, 4.0, 5.0]);
        assert_eq!(a, [20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn test_zip4_mutates_all_buffers() {
        let mut a = [0.0; 2];
        let mut b = [0.0; 2];
        let mut c = [0.0; 2];
        let g = [2.0, -2.0];

        zip4(&mut a, &mut b, &mut c, &g, |a, b, c, g| {
            *a = g;
            *b = g * g;
            *c = *a + *b;
        });

        assert_eq!(a, [2.0, -2.0]);
        assert_eq!(b, [4.0, 4.0]);
        assert_eq!(c, [6.0, 2.0]);
    }

    #[test]
    fn test_empty_buffers() {
        let mut a: [f32; 0] = [];
        zip2(&mut a, &[], |a, g| *a -= g);
    }
}
