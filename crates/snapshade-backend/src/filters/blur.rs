//! Box blur on a single-channel plane.

/// Reflect an index into `0..n` without repeating the edge sample.
#[inline]
fn mirror(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let i = i.rem_euclid(period);
    if i >= n as isize {
        (period - i) as usize
    } else {
        i as usize
    }
}

fn box_blur_h(src: &[f64], dst: &mut [f64], w: usize, h: usize, r: usize) {
    let d = (2 * r + 1) as f64;
    let r = r as isize;
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        let mut sum: f64 = (-r..=r).map(|k| row[mirror(k, w)]).sum();
        dst[y * w] = sum / d;

        for x in 1..w as isize {
            sum += row[mirror(x + r, w)] - row[mirror(x - r - 1, w)];
            dst[y * w + x as usize] = sum / d;
        }
    }
}

fn box_blur_v(src: &[f64], dst: &mut [f64], w: usize, h: usize, r: usize) {
    let d = (2 * r + 1) as f64;
    let r = r as isize;
    for x in 0..w {
        let at = |y: isize| src[mirror(y, h) * w + x];
        let mut sum: f64 = (-r..=r).map(&at).sum();
        dst[x] = sum / d;

        for y in 1..h as isize {
            sum += at(y + r) - at(y - r - 1);
            dst[y as usize * w + x] = sum / d;
        }
    }
}

/// Approximate Gaussian blur: three separable box passes with mirrored edges.
///
/// `plane` holds `w * h` samples in row-major order.
pub fn box_blur(plane: &[f64], w: usize, h: usize, radius: u32) -> Vec<f64> {
    let r = radius as usize;
    if r == 0 || w == 0 || h == 0 {
        return plane.to_vec();
    }

    let mut buf1 = plane.to_vec();
    let mut buf2 = vec![0.0; buf1.len()];

    for _ in 0..3 {
        box_blur_h(&buf1, &mut buf2, w, h, r);
        box_blur_v(&buf2, &mut buf1, w, h, r);
    }

    buf1
}
