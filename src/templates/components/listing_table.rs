use crate::backend::COLUMNS;
use crate::browser::ListingTable;
use maud::{html, Markup};

pub fn listing_table(table: &ListingTable) -> Markup {
    html! {
        div class="table-wrap" {
            table id="data-table" {
                thead {
                    tr {
                        @for column in COLUMNS {
                            th scope="col" { (column) }
                        }
                    }
                }
                tbody {
                    @for (i, row) in table.rows().iter().enumerate() {
                        tr {
                            @for (j, cell) in row.cells().iter().enumerate() {
                                @if j == 0 {
                                    td class="row-number" { (cell) }
                                } @else {
                                    td
                                        hx-post=(format!("/table/cell?row={i}&col={j}"))
                                        hx-trigger="dblclick"
                                        hx-prompt=(format!("{} 수정", COLUMNS[j]))
                                        hx-target="#workspace"
                                        hx-swap="outerHTML"
                                        title="더블클릭하여 수정"
                                    { (cell) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
