//! Rendering of CDFs as line plots, saved as SVG images

use std::path::{Path, PathBuf};

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::{LingoError, Result};
use crate::sim::Cdf;

const SIZE: (u32, u32) = (800, 600);

/// Colors for successive series, the first one matches a single-CDF plot
const PALETTE: [RGBColor; 4] = [BLACK, BLUE, RED, GREEN];

/// Turn a caller-supplied save name into a file path, adding the `.svg` extension unless one is given
pub fn svg_path(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("svg")
    }
}

fn plot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> LingoError {
    LingoError::Plot(err.to_string())
}

/// Plot a single CDF against the number of draws, as a black line with a dot at every draw
pub fn plot_cdf<P: AsRef<Path>>(cdf: &Cdf, title: &str, path: P) -> Result<()> {
    plot_cdfs(&[("", cdf)], title, path)
}

/// Plot several labelled CDFs in one chart (series with an empty label get no legend entry)
pub fn plot_cdfs<P: AsRef<Path>>(series: &[(&str, &Cdf)], title: &str, path: P) -> Result<()> {
    let max_x = series.iter().map(|(_, cdf)| cdf.len()).max().unwrap_or(0).saturating_sub(1).max(1) as f64;

    let root = SVGBackend::new(path.as_ref(), SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_x, 0.0..1.05)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Number of balls drawn in finale")
        .y_desc("Probability of getting Lingo")
        .draw()
        .map_err(plot_error)?;

    for (i, &(label, cdf)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let points: Vec<(f64, f64)> = cdf.iter().enumerate().map(|(x, p)| (x as f64, p)).collect();

        let line = chart.draw_series(LineSeries::new(points.iter().copied(), color)).map_err(plot_error)?;
        if !label.is_empty() {
            line.label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .draw_series(points.iter().map(|&point| Circle::new(point, 3, color.filled())))
            .map_err(plot_error)?;
    }

    if series.iter().any(|(label, _)| !label.is_empty()) {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lingors-{}-{}.svg", name, std::process::id()))
    }

    #[test]
    fn svg_path_adds_extension() {
        assert_eq!(svg_path("Final_CDF_Lingo"), PathBuf::from("Final_CDF_Lingo.svg"));
        assert_eq!(svg_path("out/plot.svg"), PathBuf::from("out/plot.svg"));
    }

    #[test]
    fn plots_single_cdf() {
        let path = temp_path("single");
        let cdf = Cdf::new(vec![0.0, 0.25, 0.75, 1.0]);
        plot_cdf(&cdf, "The CDF of the standard Lingo card", &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("circle"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn plots_labelled_series() {
        let path = temp_path("coupled");
        let a = Cdf::new(vec![0.0, 0.5, 1.0]);
        let b = Cdf::new(vec![0.0, 0.25, 1.0]);
        plot_cdfs(&[("reference", &a), ("candidate", &b)], "coupled", &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("candidate"));
        std::fs::remove_file(&path).unwrap();
    }
}
