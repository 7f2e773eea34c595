// Test fixtures - reusable test data
// Backend payloads and dates shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use project_calendar::models::record::RecordSet;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, June 12 2024
    pub fn mid_june_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Backend responses as the PHP endpoint sends them
pub mod payloads {
    use super::*;

    /// Two projects with tasks and comments, one legacy time slot day.
    pub const PORTAL_AND_APP: &str = r#"{
        "allProjects": [
            {"id": 1, "nome": "Portal do Cliente"},
            {"id": "2", "nome": "App Mobile"},
            {"id": 3, "nome": "Intranet"}
        ],
        "projects": [
            {
                "id": 1,
                "nome": "Portal do Cliente",
                "descricao": "Novo portal",
                "status": "em andamento",
                "versao": "1.2",
                "data_inicio": "2024-06-10 08:00:00",
                "data_fim": "2024-06-28",
                "membros": ["Ana", {"id": 9, "nome": "Bruno"}],
                "tarefas": [
                    {"id": 11, "projeto_id": 1, "nome": "Deploy homologação", "status": "feito", "data_criacao": "2024-06-12 16:30:00"},
                    {"id": 12, "projeto_id": 1, "nome": "Revisar layout", "data_criacao": "2024-06-12T09:00:00"},
                    {"id": 13, "projeto_id": 1, "nome": "Sem data", "data_criacao": null}
                ],
                "comentarios": [
                    {"id": 21, "projeto_id": 1, "autor": "Ana", "data": "2024-06-12 11:15:00", "texto": "Layout aprovado"}
                ]
            },
            {
                "id": 2,
                "nome": "App Mobile",
                "data_inicio": "2024-06-12",
                "data_fim": "2024-06-12",
                "tarefas": [],
                "comentarios": [
                    {"id": 22, "projeto_id": 2, "autor": "Caio", "data": "data inválida", "texto": "?"}
                ]
            }
        ],
        "timeSlots": [
            {
                "data": "2024-06-13",
                "tipo": "Comunidade",
                "horarios": [
                    {"hora": "19:30", "atividade": "Comunidade - Culto"},
                    {"hora": "08:00", "atividade": null}
                ]
            }
        ]
    }"#;

    /// What a misconfigured PHP server answers with status 200.
    pub const PHP_ERROR_PAGE: &str =
        "<br />\n<b>Warning</b>: mysqli_connect(): (HY000/2002): Connection refused in <b>getCalendarData.php</b>";

    pub fn portal_and_app() -> RecordSet {
        serde_json::from_str(PORTAL_AND_APP).unwrap()
    }

    /// Only the selector listing, no projects matched.
    pub fn listing_only() -> RecordSet {
        serde_json::from_str(r#"{"allProjects": [{"id": 1, "nome": "Portal do Cliente"}], "projects": [], "timeSlots": []}"#)
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_payloads_parse() {
        assert_eq!(payloads::portal_and_app().projects.len(), 2);
        assert!(payloads::listing_only().is_empty());
    }
}
