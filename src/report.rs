// =============================================================================
// report.rs — THE TWO VIEWS, IN A TERMINAL
// =============================================================================
//
// Operational view: three KPI cards, six status cards, and the trip table.
// Financial view: grand totals with the balance, the planned-vs-actual
// comparisons, and the three chart rows. Plus the detail card for a single
// trip, the filter option lists, and a JSON document with all of the above
// for anything downstream that would rather not parse text.
//
// Every view is a Display impl over values the aggregation layer already
// computed. Nothing here reads the raw data or changes state.
// =============================================================================

use std::fmt;

use serde::Serialize;

use crate::aggregate::{self, FinancialRollup, Kpis, PlannedActual, StatusCounts};
use crate::format::{format_brl, format_date, format_number, or_dash, title_case};
use crate::models::{FilterCriteria, TripRecord};
use crate::state::FilteredView;
use crate::status::StatusBucket;

/// Status cards left to right. Not the classification priority.
const CARD_ORDER: [StatusBucket; 6] = [
    StatusBucket::Requested,
    StatusBucket::Confirmed,
    StatusBucket::Completed,
    StatusBucket::Cancelled,
    StatusBucket::NotServed,
    StatusBucket::DailyOnly,
];

const RULE: &str = "──────────────────────────────────────────────────────────────";

pub struct OperationalView<'a> {
    pub kpis: Kpis,
    pub status: StatusCounts,
    pub trips: Vec<&'a TripRecord>,
}

impl<'a> OperationalView<'a> {
    pub fn build(view: &'a FilteredView) -> Self {
        Self {
            kpis: aggregate::kpis(view),
            status: aggregate::status_counts(view),
            trips: aggregate::recent_trips(view),
        }
    }
}

impl fmt::Display for OperationalView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VISÃO OPERACIONAL")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "  Total de Viagens (SEI)  {:>8}", self.kpis.unique_sei)?;
        writeln!(f, "  Total de Processos      {:>8}", self.kpis.total_requests)?;
        writeln!(f, "  Destinos Únicos         {:>8}", self.kpis.unique_destinations)?;
        writeln!(f)?;

        writeln!(f, "STATUS")?;
        for bucket in CARD_ORDER {
            writeln!(f, "  {:<22}{:>8}", bucket.label(), self.status.get(bucket))?;
        }
        writeln!(f)?;

        writeln!(f, "VIAGENS RECENTES ({})", self.trips.len())?;
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "  {:<14} {:<24} {:<10} {:<20} {:>4}  STATUS",
            "SEI", "SOLICITANTE", "SAÍDA", "DESTINO", "PAX"
        )?;
        for trip in &self.trips {
            writeln!(
                f,
                "  {:<14} {:<24} {:<10} {:<20} {:>4}  {}",
                trip.sei_number,
                truncate(&title_case(&trip.requester_name), 24),
                format_date(trip.departure_date),
                truncate(&title_case(or_dash(&trip.destination_city)), 20),
                format_number(trip.passenger_count),
                trip.status
            )?;
        }
        Ok(())
    }
}

pub struct FinancialView {
    pub rollup: FinancialRollup,
}

impl FinancialView {
    pub fn build(view: &FilteredView) -> Self {
        Self {
            rollup: aggregate::financial_rollup(view),
        }
    }
}

fn comparison_line(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    pair: PlannedActual,
    render: fn(f64) -> String,
) -> fmt::Result {
    writeln!(
        f,
        "  {:<28} Previsto {:>18}   Realizado {:>18}",
        title,
        render(pair.planned),
        render(pair.actual)
    )
}

fn km(value: f64) -> String {
    format!("{} km", format_number(value))
}

impl fmt::Display for FinancialView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.rollup;
        writeln!(f, "VISÃO FINANCEIRA")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "  Total Geral Previsto     {:>18}", format_brl(r.total.planned))?;
        writeln!(f, "  Total Geral Realizado    {:>18}", format_brl(r.total.actual))?;
        writeln!(f, "  Saldo                    {:>18}", format_brl(r.balance()))?;
        writeln!(f)?;

        writeln!(f, "DETALHAMENTO OPERACIONAL")?;
        comparison_line(f, "Quilometragem (Qtd)", r.km, km)?;
        comparison_line(f, "Total KM (R$)", r.km_cost, format_brl)?;
        comparison_line(f, "Diárias (Qtd)", r.daily_qty, format_number)?;
        comparison_line(f, "Total Diárias (R$)", r.daily_cost, format_brl)?;
        comparison_line(f, "Motorista Adicional (Qtd)", r.additional_driver_qty, format_number)?;
        comparison_line(f, "Motorista Adicional (R$)", r.additional_driver_cost, format_brl)?;
        writeln!(f)?;

        writeln!(f, "COMPARATIVO FINANCEIRO (PREVISTO VS REALIZADO)")?;
        for row in r.comparison_series() {
            writeln!(
                f,
                "  {:<14} {:>18}  {:>18}",
                row.name,
                format_brl(row.planned),
                format_brl(row.actual)
            )?;
        }
        Ok(())
    }
}

/// The detail card for one trip.
pub struct TripDetails<'a>(pub &'a TripRecord);

impl fmt::Display for TripDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        writeln!(f, "SOLICITAÇÃO {}  ·  SEI {}", or_dash(&t.request_id), or_dash(&t.sei_number))?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "  Status              {}", t.status)?;
        writeln!(f, "  Setor               {}", t.sector)?;
        if !t.sector_other.is_empty() {
            writeln!(f, "  Setor (outros)      {}", t.sector_other)?;
        }
        writeln!(f, "  Empresa             {}", or_dash(&t.company))?;
        writeln!(f, "  Executiva           {}", or_dash(&t.executive))?;
        writeln!(f)?;

        writeln!(f, "SOLICITANTE")?;
        writeln!(f, "  Nome                {}", or_dash(&title_case(&t.requester_name)))?;
        writeln!(f, "  Telefone            {}", or_dash(&t.requester_phone))?;
        writeln!(f, "  E-mail              {}", or_dash(&t.requester_email))?;
        writeln!(f, "  Responsável         {}", or_dash(&title_case(&t.responsible_name)))?;
        writeln!(f, "  Tel. responsável    {}", or_dash(&t.responsible_phone))?;
        writeln!(f)?;

        if !t.program.is_empty() || !t.event_name.is_empty() {
            writeln!(f, "EVENTO")?;
            writeln!(f, "  Programa            {}", or_dash(&t.program))?;
            writeln!(f, "  Nome                {}", or_dash(&t.event_name))?;
            writeln!(f, "  Período             {}", or_dash(&t.event_period))?;
            writeln!(f, "  Horário             {}", or_dash(&t.event_time))?;
            writeln!(f)?;
        }

        writeln!(f, "ROTEIRO")?;
        writeln!(
            f,
            "  Saída               {} {}",
            format_date(t.departure_date),
            or_dash(&t.departure_time)
        )?;
        writeln!(
            f,
            "  Retorno             {} {}",
            format_date(t.return_date),
            or_dash(&t.return_time)
        )?;
        writeln!(
            f,
            "  Origem              {} · {} · {}",
            or_dash(&title_case(&t.origin_city)),
            or_dash(&t.origin_location),
            or_dash(&t.origin_address)
        )?;
        for (i, stop) in t.filled_stops().enumerate() {
            writeln!(f, "  Parada {}            {}", i + 1, stop)?;
        }
        writeln!(
            f,
            "  Destino             {} · {} · {}",
            or_dash(&title_case(&t.destination_city)),
            or_dash(&t.destination_location),
            or_dash(&t.destination_address)
        )?;
        writeln!(f)?;

        writeln!(f, "FROTA")?;
        writeln!(f, "  Veículo             {} × {}", format_number(t.vehicle_count), or_dash(&t.vehicle_type))?;
        writeln!(f, "  Passageiros         {}", format_number(t.passenger_count))?;
        writeln!(f, "  Modalidade          {}", or_dash(&t.modality))?;
        writeln!(f, "  Disponibilidade     {}", or_dash(&t.vehicle_availability))?;
        writeln!(
            f,
            "  Capacidade          {}% ({})",
            format_number(t.capacity_percentage),
            or_dash(&t.capacity_status)
        )?;
        writeln!(f)?;

        writeln!(f, "FINANCEIRO")?;
        writeln!(f, "  KM                  {} → {} (R$/km {})", km(t.km_planned), km(t.km_actual), format_brl(t.km_unit_price))?;
        writeln!(f, "  Total KM            {} → {}", format_brl(t.km_cost_planned), format_brl(t.km_cost_actual))?;
        writeln!(
            f,
            "  Diárias             {} → {} (unit. {})",
            format_number(t.daily_qty_planned),
            format_number(t.daily_qty_actual),
            format_brl(t.daily_unit_price)
        )?;
        writeln!(f, "  Total diárias       {} → {}", format_brl(t.daily_cost_planned), format_brl(t.daily_cost_actual))?;
        writeln!(
            f,
            "  Motorista adicional {} → {} (unit. {})",
            format_number(t.additional_driver_planned),
            format_number(t.additional_driver_actual),
            format_brl(t.additional_driver_unit_price)
        )?;
        writeln!(
            f,
            "  Total motorista     {} → {}",
            format_brl(t.additional_driver_cost_planned),
            format_brl(t.additional_driver_cost_actual)
        )?;
        writeln!(f, "  Total geral         {} → {}", format_brl(t.total_planned), format_brl(t.total_actual))?;
        writeln!(f)?;

        writeln!(f, "PRAZOS")?;
        writeln!(f, "  E-mail à empresa    {}", format_date(t.email_sent_date))?;
        writeln!(f, "  Recebido na Getra   {}", format_date(t.received_date))?;
        writeln!(f, "  E-mail → Getra      {} dias", format_number(t.lead_days_email_to_receipt))?;
        writeln!(f, "  Saída → Getra       {} dias", format_number(t.lead_days_departure_to_receipt))?;

        let notes = [
            ("Informações", &t.supplementary_info),
            ("Observação", &t.general_observation),
            ("Alteração", &t.change_or_cancellation),
            ("Motivo", &t.reason),
        ];
        if notes.iter().any(|(_, text)| !text.is_empty()) {
            writeln!(f)?;
            writeln!(f, "OBSERVAÇÕES")?;
            for (label, text) in notes.iter().filter(|(_, text)| !text.is_empty()) {
                writeln!(f, "  {:<20}{}", label, text)?;
            }
        }
        Ok(())
    }
}

/// Values for the sector and month filter controls.
pub struct FilterOptions {
    pub sectors: Vec<String>,
    pub months: Vec<String>,
}

impl fmt::Display for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SETORES ({})", self.sectors.len())?;
        for s in &self.sectors {
            writeln!(f, "  {s}")?;
        }
        writeln!(f, "MESES ({})", self.months.len())?;
        for m in &self.months {
            writeln!(f, "  {m}")?;
        }
        Ok(())
    }
}

/// Everything derived from one filter, for `--json`.
#[derive(Debug, Serialize)]
pub struct DashboardDocument<'a> {
    pub filters: &'a FilterCriteria,
    pub kpis: Kpis,
    pub status_counts: StatusCounts,
    pub financial: FinancialRollup,
    pub balance: f64,
    pub comparison: Vec<aggregate::ComparisonRow>,
    pub sectors: Vec<String>,
    pub months: Vec<String>,
    pub trips: Vec<&'a TripRecord>,
}

impl<'a> DashboardDocument<'a> {
    pub fn build(
        filters: &'a FilterCriteria,
        view: &'a FilteredView,
        sectors: Vec<String>,
        months: Vec<String>,
    ) -> Self {
        let financial = aggregate::financial_rollup(view);
        Self {
            filters,
            kpis: aggregate::kpis(view),
            status_counts: aggregate::status_counts(view),
            balance: financial.balance(),
            comparison: financial.comparison_series(),
            financial,
            sectors,
            months,
            trips: view.iter().collect(),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
