use crate::backend::{ExportRow, COLUMNS, COLUMN_COUNT};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

const SHEET_NAME: &str = "매물정보";
const TITLE: &str = "부동산 매물 정보";

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;

const MIN_WIDTH: usize = 8;
const FEATURES_MAX_WIDTH: usize = 50;
const FEATURES_COL: usize = COLUMN_COUNT - 1;

/// Build the listing workbook in memory.
///
/// Layout: merged title row, bold header row, one row per table row, thin
/// borders everywhere, autofilter over header and data, panes frozen below
/// the header.
pub fn build_listings_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_background_color(Color::RGB(0xE2EFDA))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10)
        .set_background_color(Color::RGB(0xCCCCCC))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new()
        .set_font_size(10)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let features_format = Format::new()
        .set_font_size(10)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    let last_col = (COLUMN_COUNT - 1) as u16;

    worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, TITLE, &title_format)?;
    worksheet.set_row_height(TITLE_ROW, 35)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)?;
    }
    worksheet.set_row_height(HEADER_ROW, 30)?;

    for (i, row) in rows.iter().enumerate() {
        let r = FIRST_DATA_ROW + i as u32;

        for (col, cell) in row.cells().iter().enumerate() {
            let format = if col == FEATURES_COL {
                &features_format
            } else {
                &cell_format
            };
            worksheet.write_string_with_format(r, col as u16, cell, format)?;
        }
        worksheet.set_row_height(r, 30)?;
    }

    for (col, width) in column_widths(rows).iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    let last_row = HEADER_ROW + rows.len() as u32;
    worksheet.autofilter(HEADER_ROW, 0, last_row, last_col)?;
    worksheet.set_freeze_panes(FIRST_DATA_ROW, 0)?;

    workbook.save_to_buffer()
}

/// Longest value per column plus padding; features are capped, everything
/// else has a floor.
fn column_widths(rows: &[ExportRow]) -> [usize; COLUMN_COUNT] {
    let mut widths = COLUMNS.map(|header| header.chars().count());

    for row in rows {
        for (col, cell) in row.cells().iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    for (col, width) in widths.iter_mut().enumerate() {
        *width = if col == FEATURES_COL {
            (*width + 2).min(FEATURES_MAX_WIDTH)
        } else {
            (*width + 2).max(MIN_WIDTH)
        };
    }

    widths
}
