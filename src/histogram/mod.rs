//! Per-category normalized histograms
//!
//! [`build`] turns a categorical column, a numerical column and a category
//! selection into one [`HistogramTable`]: `bin_count` rows per selected
//! category, each carrying the share of that category's in-range records
//! that fell into the bin.
//!
//! A category with no in-range records gets all-zero proportions. That is
//! not an error; it is reported through [`HistogramTable::empty_categories`].

mod bins;
mod palette;

pub use bins::BinSpec;
pub use palette::Color;

use std::collections::HashMap;

use crate::constants::histogram::PROPORTION_TOLERANCE;
use crate::data::DataSource;
use crate::error::Result;

/// One bar: a (category, bin) pair
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramRow {
    /// Share of the category's in-range records, in `[0, 1]`
    pub proportion: f64,
    pub left: f64,
    pub right: f64,
    /// Raw number of records in the bin
    pub count: usize,
    pub category_label: String,
    pub color: Color,
}

impl HistogramRow {
    /// Hover text for the bin interval, e.g. `"-5 to 0"`
    pub fn interval_label(&self) -> String {
        format!("{} to {}", format_edge(self.left), format_edge(self.right))
    }

    /// Hover text for the proportion, as a percentage
    pub fn proportion_label(&self) -> String {
        format!("{:.2}%", self.proportion * 100.0)
    }

    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

fn format_edge(edge: f64) -> String {
    if edge.fract() == 0.0 {
        format!("{:.0}", edge)
    } else {
        format!("{:.2}", edge)
    }
}

/// What the builder found for one selected category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub label: String,
    pub color: Color,
    /// Records carrying this label, in range or not
    pub total: usize,
    /// Records that landed in a bin
    pub in_range: usize,
}

impl CategorySummary {
    pub fn has_data(&self) -> bool {
        self.in_range > 0
    }
}

/// Rows for every selected category, sorted by `(category_label, left)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramTable {
    rows: Vec<HistogramRow>,
    categories: Vec<CategorySummary>,
    spec: Option<BinSpec>,
}

impl HistogramTable {
    pub fn rows(&self) -> &[HistogramRow] {
        &self.rows
    }

    /// Summaries in selection order
    pub fn categories(&self) -> &[CategorySummary] {
        &self.categories
    }

    pub fn bin_spec(&self) -> Option<&BinSpec> {
        self.spec.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows of a single category, in ascending `left` order
    pub fn rows_for<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a HistogramRow> + 'a {
        self.rows.iter().filter(move |row| row.category_label == label)
    }

    /// Labels whose proportions fell back to zero because nothing was in range
    pub fn empty_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| !c.has_data())
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Tallest bar, for sizing the y axis
    pub fn max_proportion(&self) -> f64 {
        self.rows.iter().map(|r| r.proportion).fold(0.0, f64::max)
    }
}

/// Build one normalized histogram per selected category from the loaded table.
///
/// Both columns must exist. `selected_categories` are matched against the
/// string form of the categorical column; duplicates after the first
/// occurrence are ignored. Colors follow selection order.
pub fn build(
    source: &DataSource,
    category_column: &str,
    value_column: &str,
    selected_categories: &[String],
    range_start: f64,
    range_end: f64,
    bin_width: f64,
) -> Result<HistogramTable> {
    profiling::scope!("build_histogram");

    let spec = BinSpec::new(range_start, range_end, bin_width)?;
    let labels = source.column_as_labels(category_column)?;
    let values = source.column_as_f64(value_column)?;

    let table = build_from_columns(&labels, &values, selected_categories, &spec);
    tracing::debug!(
        category_column,
        value_column,
        categories = table.categories().len(),
        bins = spec.bin_count(),
        rows = table.len(),
        "histogram rebuilt"
    );
    Ok(table)
}

/// Binning over already-extracted, row-aligned columns
pub fn build_from_columns(
    labels: &[Option<String>],
    values: &[f64],
    selected_categories: &[String],
    spec: &BinSpec,
) -> HistogramTable {
    let edges = spec.edges();
    let bin_count = spec.bin_count();

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut selected: Vec<&str> = Vec::new();
    for label in selected_categories {
        if !slots.contains_key(label.as_str()) {
            slots.insert(label.as_str(), selected.len());
            selected.push(label.as_str());
        }
    }

    let mut counts = vec![vec![0usize; bin_count]; selected.len()];
    let mut totals = vec![0usize; selected.len()];

    for (label, &value) in labels.iter().zip(values) {
        let Some(label) = label else { continue };
        let Some(&slot) = slots.get(label.as_str()) else { continue };
        totals[slot] += 1;
        if let Some(bin) = spec.bin_of(value, &edges) {
            counts[slot][bin] += 1;
        }
    }

    let mut rows = Vec::with_capacity(selected.len() * bin_count);
    let mut categories = Vec::with_capacity(selected.len());

    for (position, label) in selected.iter().enumerate() {
        let color = Color::for_position(position);
        let in_range: usize = counts[position].iter().sum();

        for (bin, &count) in counts[position].iter().enumerate() {
            let proportion = if in_range == 0 {
                0.0
            } else {
                count as f64 / in_range as f64
            };
            rows.push(HistogramRow {
                proportion,
                left: edges[bin],
                right: edges[bin + 1],
                count,
                category_label: label.to_string(),
                color,
            });
        }

        debug_assert!(
            in_range == 0
                || (rows[rows.len() - bin_count..]
                    .iter()
                    .map(|r: &HistogramRow| r.proportion)
                    .sum::<f64>()
                    - 1.0)
                    .abs()
                    < PROPORTION_TOLERANCE
        );

        categories.push(CategorySummary {
            label: label.to_string(),
            color,
            total: totals[position],
            in_range,
        });
    }

    rows.sort_by(|a, b| {
        a.category_label
            .cmp(&b.category_label)
            .then(a.left.total_cmp(&b.left))
    });

    HistogramTable {
        rows,
        categories,
        spec: Some(*spec),
    }
}
