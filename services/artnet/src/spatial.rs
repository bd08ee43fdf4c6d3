use ledcontrol_settings::SpatialSmoothing;

/// Builds the 1-D convolution kernel for `smoothing` over `requested_width`
/// physical LEDs (spec 4.E step 4). The width is forced odd (incremented
/// if even) so there is always a well-defined center tap.
fn build_kernel(smoothing: SpatialSmoothing, requested_width: usize) -> Vec<f32> {
    let width = if requested_width % 2 == 0 {
        requested_width + 1
    } else {
        requested_width
    };
    let center = (width / 2) as f32;

    match smoothing {
        SpatialSmoothing::None => vec![1.0],
        SpatialSmoothing::Average => vec![1.0 / width as f32; width],
        SpatialSmoothing::Lerp => {
            let raw: Vec<f32> = (0..width)
                .map(|i| width as f32 - (i as f32 - center).abs())
                .collect();
            let sum: f32 = raw.iter().sum();
            raw.iter().map(|w| w / sum).collect()
        }
        SpatialSmoothing::Gaussian => {
            let sigma = (width as f32 / 4.0).max(1.0);
            let raw: Vec<f32> = (0..width)
                .map(|i| {
                    let d = (i as f32 - center) / sigma;
                    (-0.5 * d * d).exp()
                })
                .collect();
            let sum: f32 = raw.iter().sum();
            raw.iter().map(|w| w / sum).collect()
        }
    }
}

/// Convolves `frame` (one `(r,g,b,w)` tuple per physical LED) with the
/// kernel for `smoothing`/`width`. Out-of-range neighbor taps contribute
/// nothing and are not renormalized, so the edges darken slightly rather
/// than wrap or reflect (spec 4.E step 4, "edges are allowed to darken
/// slightly"; spec 9 "Open question" pins this as canonical). A flat
/// input is returned unchanged for any kernel (every weight sums to 1
/// and every tap reads the same value).
pub fn convolve(frame: &[(u8, u8, u8, u8)], smoothing: SpatialSmoothing, width: usize) -> Vec<(u8, u8, u8, u8)> {
    if smoothing == SpatialSmoothing::None || width <= 1 {
        return frame.to_vec();
    }
    let kernel = build_kernel(smoothing, width);
    let half = (kernel.len() / 2) as isize;
    let n = frame.len() as isize;

    frame
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let mut acc = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
            for (k, &weight) in kernel.iter().enumerate() {
                let neighbor = i as isize + (k as isize - half);
                if neighbor < 0 || neighbor >= n {
                    continue;
                }
                let (r, g, b, w) = frame[neighbor as usize];
                acc.0 += r as f32 * weight;
                acc.1 += g as f32 * weight;
                acc.2 += b as f32 * weight;
                acc.3 += w as f32 * weight;
            }
            (acc.0.round() as u8, acc.1.round() as u8, acc.2.round() as u8, acc.3.round() as u8)
        })
        .collect()
}
