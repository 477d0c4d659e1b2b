// Column headers of the trip spreadsheet, exactly as the web app emits them.
// They are free text typed by whoever maintains the sheet: accents, slashes
// and the occasional percent sign are all part of the key.

pub const ORDER: &str = "ORDEM";
pub const REQUEST_ID: &str = "CÓDIGO DA SOLICITAÇÃO";
pub const COMPANY: &str = "EMPRESA";
pub const SEI_NUMBER: &str = "NÚMERO DO SEI";

pub const REQUESTER_NAME: &str = "NOME DO SOLICITANTE";
pub const REQUESTER_PHONE: &str = "TELEFONE DO SOLICITANTE";
pub const REQUESTER_EMAIL: &str = "E-MAIL DO SOLICITANTE";
pub const EXECUTIVE: &str = "EXECUTIVA";
pub const REQUESTER_SECTOR: &str = "SETOR DO SOLICITANTE";
/// Older exports used a bare "SETOR" header.
pub const SECTOR: &str = "SETOR";
pub const SECTOR_OTHER: &str = "CASO O SETOR DO SOLICITANTE FOR OUTROS, INFORME AQUI";

pub const PROGRAM: &str = "PROGRAMA";
pub const EVENT_NAME: &str = "NOME DO EVENTO";
pub const EVENT_PERIOD: &str = "PERÍODO DO EVENTO";
pub const EVENT_TIME: &str = "HORÁRIO DO EVENTO";

pub const DEPARTURE_DATE: &str = "DATA DE SAÍDA";
pub const RETURN_DATE: &str = "DATA DO RETORNO";
pub const DEPARTURE_TIME: &str = "HORÁRIO DE SAÍDA";
pub const RETURN_TIME: &str = "HORÁRIO DE RETORNO";

pub const ORIGIN_CITY: &str = "CIDADE DE ORIGEM";
pub const ORIGIN_LOCATION: &str = "LOCAL DE SAÍDA";
pub const ORIGIN_ADDRESS: &str = "ENDEREÇO COMPLETO DE ORIGEM";
pub const STOPS: [&str; 6] = [
    "PARADA 1", "PARADA 2", "PARADA 3", "PARADA 4", "PARADA 5", "PARADA 6",
];
pub const DESTINATION_CITY: &str = "CIDADE DE DESTINO";
pub const DESTINATION_LOCATION: &str = "LOCAL DE DESTINO";
pub const DESTINATION_ADDRESS: &str = "ENDEREÇO COMPLETO DE DESTINO";

pub const PASSENGER_COUNT: &str = "TOTAL DE PASSAGEIROS";
pub const MODALITY: &str = "MODALIDADE DA VIAGEM";
pub const VEHICLE_AVAILABILITY: &str = "DISPONIBILIDADE DE VEÍCULOS";
pub const RESPONSIBLE_NAME: &str = "NOME DO RESPONSÁVEL";
pub const RESPONSIBLE_PHONE: &str = "TELEFONE DO RESPONSÁVEL";
pub const SUPPLEMENTARY_INFO: &str = "INFORMAÇÕES COMPLEMENTARES";
pub const STATUS: &str = "STATUS FINAL";
pub const VEHICLE_TYPE: &str = "TIPO DE VEÍCULO";
pub const VEHICLE_COUNT: &str = "QUANTIDADE DE VEÍCULOS";
pub const CAPACITY_STATUS: &str = "STATUS DA CAPACIDADE";
pub const CAPACITY_PERCENTAGE: &str = "% CAPACIDADE DO VEÍCULO";

pub const KM_PLANNED: &str = "KM PREVISTO";
pub const KM_ACTUAL: &str = "KM REALIZADO";
pub const KM_UNIT_PRICE: &str = "VALOR UNITÁRIO DO KM";
pub const KM_COST_PLANNED: &str = "VALOR TOTAL DO KM PREVISTO";
pub const KM_COST_ACTUAL: &str = "VALOR TOTAL DO KM REALIZADO";

pub const DAILY_UNIT_PRICE: &str = "VALOR UNITÁRIO DAS DIÁRIAS";
pub const DAILY_QTY_PLANNED: &str = "DIÁRIAS PREVISTAS";
pub const DAILY_QTY_ACTUAL: &str = "DIÁRIAS REALIZADAS";
pub const DAILY_COST_PLANNED: &str = "VALOR TOTAL DAS DIÁRIAS PREVISTAS";
pub const DAILY_COST_ACTUAL: &str = "VALOR TOTAL DAS DIÁRIAS REALIZADAS";

pub const ADDITIONAL_DRIVER_PLANNED: &str = "MOTORISTA ADICIONAL PREVISTO";
pub const ADDITIONAL_DRIVER_ACTUAL: &str = "MOTORISTA ADICIONAL REALIZADO";
pub const ADDITIONAL_DRIVER_UNIT_PRICE: &str = "VALOR UNITÁRIO DO MOTORISTA ADICIONAL";
pub const ADDITIONAL_DRIVER_COST_PLANNED: &str = "VALOR TOTAL DO MOTORISTA ADICIONAL PREVISTO";
pub const ADDITIONAL_DRIVER_COST_ACTUAL: &str = "VALOR TOTAL DO MOTORISTA ADICIONAL REALIZADO";

pub const TOTAL_PLANNED: &str = "TOTAL GERAL PREVISTO";
pub const TOTAL_ACTUAL: &str = "TOTAL GERAL REALIZADO";

pub const CHANGE_OR_CANCELLATION: &str = "ALTERAÇÃO/CANCELAMENTO";
pub const REASON: &str = "MOTIVO";
pub const GENERAL_OBSERVATION: &str = "OBSERVAÇÃO GERAL";

pub const EMAIL_SENT_DATE: &str = "DATA DO E-MAIL ENVIADO A EMPRESA";
pub const RECEIVED_DATE: &str = "DATA RECEBIDO NA GETRA";
pub const LEAD_DAYS_EMAIL_TO_RECEIPT: &str = "PRAZO ENTRE ENVIO DO E-MAIL E DO RECEBIMENTO NA GETRA";
pub const LEAD_DAYS_DEPARTURE_TO_RECEIPT: &str = "PRAZO ENTRE DATA DE SAÍDA E DO RECEBIMENTO NA GETRA";
