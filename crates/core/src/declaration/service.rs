//! Declaration pipeline service.

use declara_shared::DeclarationSettings;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info};

use super::codes::ReverseChargeMap;
use super::document::render_document;
use super::error::DeclarationError;
use super::grouper::{GroupedLines, group_lines};
use super::intake::{DeclarationInputs, PurchaseLine, SalesLine};
use super::mapper::map_declaration;
use super::reverse_charge::{derive_reverse_charge_lines, merge_output_lines};
use super::source::TaxLineSource;
use super::types::{
    AggregatedLine, Declaration, DeclarationHeader, DeclarationRequest, Direction, RawTaxLine,
    SectionTotals,
};

/// Everything one run produced, kept for display and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationRun {
    /// Sales-side lines including the merged reverse-charge lines.
    pub output_lines: GroupedLines,
    /// Purchase-side lines.
    pub input_lines: GroupedLines,
    /// Lines derived from reverse-charge purchases, before merging.
    pub reverse_charge_lines: Vec<AggregatedLine>,
    /// Summary sections.
    pub totals: SectionTotals,
    /// The declaration.
    pub declaration: Declaration,
}

/// Stateless service running the declaration pipeline.
pub struct DeclarationService;

impl DeclarationService {
    /// Validates the inputs and runs the pipeline.
    pub fn compute(
        inputs: &DeclarationInputs,
        settings: &DeclarationSettings,
    ) -> Result<DeclarationRun, DeclarationError> {
        let sales = inputs
            .sales
            .iter()
            .map(SalesLine::to_raw_line)
            .chain(
                inputs
                    .adjustments
                    .iter()
                    .map(|doc| doc.to_raw_line(settings.default_adjustment_rate)),
            )
            .collect::<Result<Vec<_>, _>>()?;

        let purchases = inputs
            .purchases
            .iter()
            .map(PurchaseLine::to_raw_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::aggregate(&sales, &purchases, ReverseChargeMap::standard()))
    }

    /// Runs the pure pipeline over already normalized lines.
    #[must_use]
    pub fn aggregate(
        sales: &[RawTaxLine],
        purchases: &[RawTaxLine],
        map: &ReverseChargeMap,
    ) -> DeclarationRun {
        let original_output = group_lines(Direction::Output, sales);
        let input_lines = group_lines(Direction::Input, purchases);

        let reverse_charge_lines = derive_reverse_charge_lines(&input_lines, map);
        let output_lines = merge_output_lines(&original_output, &reverse_charge_lines);

        let totals = SectionTotals::compute(&output_lines, &reverse_charge_lines, &input_lines);
        let declaration = map_declaration(&totals, &output_lines, &input_lines);

        debug!(
            output_codes = output_lines.len(),
            input_codes = input_lines.len(),
            reverse_charge_lines = reverse_charge_lines.len(),
            "aggregated declaration lines"
        );

        DeclarationRun {
            output_lines,
            input_lines,
            reverse_charge_lines,
            totals,
            declaration,
        }
    }

    /// Computes independent runs in parallel, preserving input order.
    pub fn compute_batch(
        batch: &[DeclarationInputs],
        settings: &DeclarationSettings,
    ) -> Vec<Result<DeclarationRun, DeclarationError>> {
        batch
            .par_iter()
            .map(|inputs| Self::compute(inputs, settings))
            .collect()
    }

    /// Fetches the period's records and computes the declaration.
    ///
    /// Any fetch failure aborts the run; no partial declaration is returned.
    pub async fn generate<S: TaxLineSource>(
        source: &S,
        request: &DeclarationRequest,
        settings: &DeclarationSettings,
    ) -> Result<DeclarationRun, DeclarationError> {
        info!(
            tenant_id = %request.tenant_id,
            legal_entity_id = ?request.legal_entity_id,
            period_start = %request.period.start(),
            period_end = %request.period.end(),
            "Starting declaration run"
        );

        let (sales, purchases, adjustments) = futures::try_join!(
            source.sales_lines(request),
            source.purchase_lines(request),
            source.adjustment_documents(request)
        )
        .inspect_err(|e| error!(tenant_id = %request.tenant_id, "Failed to fetch declaration records: {e}"))?;

        let inputs = DeclarationInputs {
            sales,
            purchases,
            adjustments,
        };
        let run = Self::compute(&inputs, settings)?;

        info!(
            tenant_id = %request.tenant_id,
            records = inputs.len(),
            net_position = %run.declaration.net_position,
            "Declaration computed"
        );
        Ok(run)
    }

    /// Renders the filing document of a run.
    pub fn render(header: &DeclarationHeader, run: &DeclarationRun) -> Result<String, DeclarationError> {
        render_document(header, &run.declaration)
    }
}
