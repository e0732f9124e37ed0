//! Fuzz test for forward/reverse rendering symmetry.
//!
//! This fuzzer builds row-change events from arbitrary columns and verifies that:
//! 1. Reverse rendering of an update equals forward rendering with the images swapped
//! 2. Reverse rendering of an insert equals forward rendering of the matching delete
//! 3. Rendering never panics

use arbitrary::Arbitrary;
use binlog_flashback::{
    ColumnRecord, ColumnType, EventRenderer, RenderDirection, RowChangeEvent,
};
use honggfuzz::fuzz;

#[derive(Debug, Arbitrary)]
struct FuzzColumn {
    name: String,
    column_type: ColumnType,
    previous: Vec<u8>,
    current: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct FuzzEvent {
    schema: String,
    table: String,
    columns: Vec<FuzzColumn>,
}

fn main() {
    let forward = EventRenderer::new(RenderDirection::Forward);
    let reverse = EventRenderer::new(RenderDirection::Reverse);

    loop {
        fuzz!(|input: FuzzEvent| {
            let mut update = RowChangeEvent::update(&input.schema, &input.table);
            let mut swapped = RowChangeEvent::update(&input.schema, &input.table);
            let mut insert = RowChangeEvent::insert(&input.schema, &input.table);
            let mut delete = RowChangeEvent::delete(&input.schema, &input.table);

            for column in &input.columns {
                update = update.column(ColumnRecord::changed(
                    column.name.as_str(),
                    column.column_type,
                    column.previous.clone(),
                    column.current.clone(),
                ));
                swapped = swapped.column(ColumnRecord::changed(
                    column.name.as_str(),
                    column.column_type,
                    column.current.clone(),
                    column.previous.clone(),
                ));
                insert = insert.column(ColumnRecord::new(
                    column.name.as_str(),
                    column.column_type,
                    column.current.clone(),
                ));
                delete = delete.column(ColumnRecord::new(
                    column.name.as_str(),
                    column.column_type,
                    column.current.clone(),
                ));
            }

            assert_eq!(reverse.render(&update).ok(), forward.render(&swapped).ok());
            assert_eq!(reverse.render(&insert), forward.render(&delete));
            assert_eq!(reverse.render(&delete), forward.render(&insert));
        });
    }
}
