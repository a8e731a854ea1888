// ==========================================
// MSY 库存智能 - 到货表规范化
// ==========================================
// 规范列: Ingredient / QtyPerShipment / NumShipments / Unit(可选) / Frequency(可选)
// 别名: quantity per shipment / number of shipments / unit of shipment / frequency
// 静默默认:
// - Frequency 缺列 → weekly; 未识别值 → 系数 1.0
// - Unit 缺列 → 空串
// ==========================================

use crate::domain::shipment::ShipmentRecord;
use crate::domain::types::{Frequency, TableKind};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{shipment_columns, FieldMapper};
use crate::importer::normalizer_trait::{Normalized, TableNormalizer};
use crate::importer::raw_table::RawTable;
use tracing::{debug, instrument};

pub struct ShipmentNormalizer;

impl TableNormalizer for ShipmentNormalizer {
    type Record = ShipmentRecord;

    fn table_kind(&self) -> TableKind {
        TableKind::Shipments
    }

    #[instrument(skip(self, table), fields(table = %table.name, rows = table.row_count()))]
    fn normalize(&self, table: &RawTable) -> ImportResult<Normalized<ShipmentRecord>> {
        let mapper = FieldMapper;
        let cleaner = DataCleaner;
        debug!(columns = ?table.headers, "到货表列");

        let cols = mapper.require(
            self.table_kind(),
            &table.headers,
            &[
                shipment_columns::INGREDIENT,
                shipment_columns::QTY_PER_SHIPMENT,
                shipment_columns::NUM_SHIPMENTS,
            ],
        )?;
        let (ingredient_col, qty_col, num_col) = (cols[0], cols[1], cols[2]);
        let unit_col = mapper.resolve(&table.headers, &shipment_columns::UNIT);
        let frequency_col = mapper.resolve(&table.headers, &shipment_columns::FREQUENCY);

        let mut records = Vec::with_capacity(table.row_count());
        let mut dropped_rows = 0;

        for row in &table.rows {
            let ingredient = cleaner.clean_text(table.cell(row, ingredient_col));
            if ingredient.is_empty() {
                dropped_rows += 1;
                continue;
            }

            let frequency = table
                .optional_cell(row, frequency_col)
                .map(Frequency::parse)
                .unwrap_or_default();

            records.push(ShipmentRecord {
                ingredient,
                qty_per_shipment: cleaner.coerce_f64(table.cell(row, qty_col)),
                num_shipments: cleaner.coerce_f64(table.cell(row, num_col)),
                frequency,
                unit: table
                    .optional_cell(row, unit_col)
                    .map(|v| cleaner.clean_text(v))
                    .unwrap_or_default(),
            });
        }

        debug!(records = records.len(), dropped_rows, "到货表规范化完成");

        Ok(Normalized {
            records,
            dropped_rows,
            collapsed_rows: 0,
        })
    }
}
