//! XLSX writer

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use log::debug;
use rust_xlsxwriter::{
    ConditionalFormatFormula, DataValidation as XlsxDataValidation, DataValidationErrorStyle,
    Format, FormatAlign, FormatBorder, Formula, Workbook,
};

use crate::error::XlsxResult;
use quote_sheets_core::style::{BorderLineStyle, HorizontalAlignment, Style, VerticalAlignment};
use quote_sheets_core::validation::ValidationErrorStyle;
use quote_sheets_core::{CellValue, DataValidation, Worksheet};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write worksheets to a file path, one tab per sheet in the given order
    pub fn write_file<P: AsRef<Path>>(sheets: &[&Worksheet], path: P) -> XlsxResult<()> {
        let buffer = Self::write_buffer(sheets)?;
        std::fs::write(path, buffer)?;
        Ok(())
    }

    /// Write worksheets to a writer
    pub fn write<W: Write>(sheets: &[&Worksheet], mut writer: W) -> XlsxResult<()> {
        let buffer = Self::write_buffer(sheets)?;
        writer.write_all(&buffer)?;
        Ok(())
    }

    /// Encode worksheets into an in-memory XLSX file
    pub fn write_buffer(sheets: &[&Worksheet]) -> XlsxResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let mut formats = FormatCache::default();

        for sheet in sheets {
            Self::write_worksheet(&mut workbook, sheet, &mut formats)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn write_worksheet(
        workbook: &mut Workbook,
        sheet: &Worksheet,
        formats: &mut FormatCache,
    ) -> XlsxResult<()> {
        let target = workbook.add_worksheet();
        target.set_name(sheet.name())?;

        for (&col, &width) in sheet.custom_column_widths() {
            target.set_column_width(col, width)?;
        }

        // Merged regions carry the top-left cell's text and style; the other
        // cells of the region must not be written separately.
        for region in sheet.merged_regions() {
            let text = sheet.get_value_at(region.start.row, region.start.col).to_string();
            let style = sheet
                .cell_style_at(region.start.row, region.start.col)
                .cloned()
                .unwrap_or_default();
            target.merge_range(
                region.start.row,
                region.start.col,
                region.end.row,
                region.end.col,
                &text,
                formats.get(&style),
            )?;
        }

        for (row, col, data) in sheet.iter_cells() {
            if sheet.merged_region_at(row, col).is_some() {
                continue;
            }

            let format = data.style.as_ref().map(|s| formats.get(s).clone());

            match (&data.value, format) {
                (CellValue::Empty, None) => {}
                (CellValue::Empty, Some(format)) => {
                    target.write_blank(row, col, &format)?;
                }
                (CellValue::Number(n), None) => {
                    target.write_number(row, col, *n)?;
                }
                (CellValue::Number(n), Some(format)) => {
                    target.write_number_with_format(row, col, *n, &format)?;
                }
                (CellValue::String(s), None) => {
                    target.write_string(row, col, s.as_str())?;
                }
                (CellValue::String(s), Some(format)) => {
                    target.write_string_with_format(row, col, s.as_str(), &format)?;
                }
                (CellValue::Boolean(b), None) => {
                    target.write_boolean(row, col, *b)?;
                }
                (CellValue::Boolean(b), Some(format)) => {
                    target.write_boolean_with_format(row, col, *b, &format)?;
                }
                (CellValue::Error(e), format) => {
                    // Error literals are valid formula constants; the cached
                    // result keeps readers that skip calculation consistent.
                    let formula = Formula::new(format!("={}", e)).set_result(e.as_str());
                    match format {
                        Some(format) => {
                            target.write_formula_with_format(row, col, formula, &format)?;
                        }
                        None => {
                            target.write_formula(row, col, formula)?;
                        }
                    }
                }
            }
        }

        for validation in sheet.data_validations() {
            let rule = Self::data_validation(validation)?;
            for range in &validation.ranges {
                target.add_data_validation(
                    range.start.row,
                    range.start.col,
                    range.end.row,
                    range.end.col,
                    &rule,
                )?;
            }
        }

        let mut rules: Vec<_> = sheet.conditional_formats().iter().collect();
        rules.sort_by_key(|r| r.priority);
        for rule in rules {
            let conditional_format = ConditionalFormatFormula::new()
                .set_rule(rule.formula.as_str())
                .set_format(formats.get(&rule.format))
                .set_stop_if_true(rule.stop_if_true);
            for range in &rule.ranges {
                target.add_conditional_format(
                    range.start.row,
                    range.start.col,
                    range.end.row,
                    range.end.col,
                    &conditional_format,
                )?;
            }
        }

        debug!(
            "wrote sheet '{}': {} cells, {} merges, {} validations, {} conditional formats",
            sheet.name(),
            sheet.cell_count(),
            sheet.merged_regions().len(),
            sheet.data_validation_count(),
            sheet.conditional_format_count()
        );

        Ok(())
    }

    fn data_validation(validation: &DataValidation) -> XlsxResult<XlsxDataValidation> {
        let mut rule = XlsxDataValidation::new()
            .allow_list_strings(validation.values.as_slice())?
            .ignore_blank(validation.allow_blank)
            .set_error_style(match validation.error_style {
                ValidationErrorStyle::Stop => DataValidationErrorStyle::Stop,
                ValidationErrorStyle::Warning => DataValidationErrorStyle::Warning,
                ValidationErrorStyle::Information => DataValidationErrorStyle::Information,
            });

        if let Some(message) = &validation.input_message {
            rule = rule.set_input_message(message.as_str())?;
        }
        if let Some(title) = &validation.error_title {
            rule = rule.set_error_title(title.as_str())?;
        }
        if let Some(message) = &validation.error_message {
            rule = rule.set_error_message(message.as_str())?;
        }

        Ok(rule)
    }
}

/// Deduplicates formats so identical styles share one XF record
#[derive(Default)]
struct FormatCache {
    formats: HashMap<Style, Format>,
}

impl FormatCache {
    fn get(&mut self, style: &Style) -> &Format {
        self.formats
            .entry(style.clone())
            .or_insert_with(|| to_format(style))
    }
}

fn to_format(style: &Style) -> Format {
    let mut format = Format::new();

    if style.bold {
        format = format.set_bold();
    }
    if !style.font_color.is_auto() {
        format = format.set_font_color(style.font_color.to_rgb_u32());
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(fill.to_rgb_u32());
    }

    format = match style.border {
        BorderLineStyle::None => format,
        BorderLineStyle::Thin => format.set_border(FormatBorder::Thin),
        BorderLineStyle::Medium => format.set_border(FormatBorder::Medium),
        BorderLineStyle::Thick => format.set_border(FormatBorder::Thick),
    };

    format = match style.horizontal {
        HorizontalAlignment::General => format,
        HorizontalAlignment::Left => format.set_align(FormatAlign::Left),
        HorizontalAlignment::Center => format.set_align(FormatAlign::Center),
        HorizontalAlignment::Right => format.set_align(FormatAlign::Right),
    };

    match style.vertical {
        VerticalAlignment::Top => format.set_align(FormatAlign::Top),
        VerticalAlignment::Center => format.set_align(FormatAlign::VerticalCenter),
        VerticalAlignment::Bottom => format,
    }
}
