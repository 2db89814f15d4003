//! Application related stuff

use clap::Parser;

/// Rendering options.
#[derive(Parser, Clone, Debug, Default, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 0,
        help = "Use specified number of threads for rendering (0 = one per logical CPU)."
    )]
    pub n_threads: usize,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Write the image after every wave of samples.
    #[arg(
        long = "write-partial-images",
        help = "Periodically write the current image to disk while rendering."
    )]
    pub write_partial_images: bool,

    /// Seed for the samplers.
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 0,
        help = "Set the random number generator seed."
    )]
    pub seed: u64,

    /// Tile size. Picked from the image size and thread count if absent.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: Option<usize>,

    /// Always sample pixel centres.
    #[arg(
        long = "disable-pixel-jitter",
        help = "Always sample pixels at their centers."
    )]
    pub disable_pixel_jitter: bool,

    /// Always use the same wavelengths.
    #[arg(
        long = "disable-wavelength-jitter",
        help = "Always sample the same wavelengths of light."
    )]
    pub disable_wavelength_jitter: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        help = "Write the final image to the given filename."
    )]
    pub image_file: Option<String>,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => max_threads,
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
