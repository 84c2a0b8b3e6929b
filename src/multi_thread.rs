use crate::resample::{Interpolation, ResampleError, Resampler};
use crate::util::tracing_wrappers::*;
use crate::{Image, Pixel};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

#[inline(never)]
pub(crate) fn resample_batch<V, H, S, D, BS, BD, const VN: usize, const HN: usize>(
    resampler: &Resampler<V, H, VN, HN>,
    jobs: Vec<(&Image<S, BS>, &mut Image<D, BD>)>,
) -> Result<(), ResampleError>
where
    V: Interpolation<VN>,
    H: Interpolation<HN>,
    S: Pixel,
    D: Pixel,
    BS: AsRef<[u8]> + Sync,
    BD: AsRef<[u8]> + AsMut<[u8]> + Send,
{
    let threads = num_cpus::get();

    debug!(jobs = jobs.len(), threads, "resample batch");

    if threads == 1 {
        return jobs
            .into_iter()
            .try_for_each(|(src, dst)| resampler.resample(src, dst));
    }

    jobs.into_par_iter()
        .try_for_each(|(src, dst)| resampler.resample(src, dst))
}

#[cfg(test)]
mod tests {
    use crate::{BicubicResampler, Image, ImageError, ResampleError, Rgb888, Yuv422};

    #[test]
    fn batch_matches_single_calls() {
        let sources: Vec<Image<Rgb888, Vec<u8>>> = (0..6u8)
            .map(|i| {
                let buf: Vec<u8> = (0..8 * 6 * 3)
                    .map(|b| (b as u8).wrapping_mul(i + 1))
                    .collect();

                Image::<Rgb888, _>::new(buf, 8, 6, 0).unwrap()
            })
            .collect();

        let mut batch: Vec<Image<Yuv422, Vec<u8>>> =
            (0..6).map(|_| Image::<Yuv422, _>::blank(4, 3).unwrap()).collect();

        let resampler = BicubicResampler::new();
        resampler
            .resample_batch(sources.iter().zip(batch.iter_mut()).collect())
            .unwrap();

        for (src, batched) in sources.iter().zip(&batch) {
            let mut single = Image::<Yuv422, _>::blank(4, 3).unwrap();
            resampler.resample(src, &mut single).unwrap();

            assert_eq!(single.buffer(), batched.buffer());
        }
    }

    #[test]
    fn batch_reports_failure() {
        let good = Image::<Rgb888, _>::blank(2, 2).unwrap();
        let bad = Image::<Rgb888, Vec<u8>>::unbound(2, 2).unwrap();

        let mut a = Image::<Rgb888, _>::blank(2, 2).unwrap();
        let mut b = Image::<Rgb888, _>::blank(2, 2).unwrap();

        let jobs = vec![(&good, &mut a), (&bad, &mut b)];
        let result = BicubicResampler::new().resample_batch(jobs);

        assert_eq!(result, Err(ResampleError::Image(ImageError::Unbound)));
    }
}
