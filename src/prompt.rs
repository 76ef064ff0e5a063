//! The fixed instruction sent to the search model.
//!
//! Only the date varies; the tags, item limit and fallback sentence form the
//! contract with [`crate::sections::classify`].

use crate::category::Category;
use chrono::{Datelike, NaiveDate};

/// Maximum news items requested per section
pub const MAX_ITEMS_PER_SECTION: usize = 4;

/// Sentence the model is told to write for a section with no news
pub const EMPTY_SECTION_TEXT: &str = "Nenhuma atualização relevante hoje.";

/// Build the instruction for `today`.
pub fn build_prompt(today: NaiveDate) -> String {
    let year = today.year();
    let next_year = year + 1;
    let tags = Category::ALL
        .iter()
        .filter_map(|c| c.marker())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Data de hoje: {today}.
Estamos em {year}. Busque notícias de HOJE e previsões para {next_year}.
Atue como um analista de notícias focado em PROFESSORES.

REGRAS DE FORMATAÇÃO:
- Use EXATAMENTE as tags {tags}.
- Para cada seção, liste no máximo {MAX_ITEMS_PER_SECTION} notícias principais para manter a interface fluida.
- Se não houver notícias recentes para uma categoria, escreva: "{EMPTY_SECTION_TEXT}"

FOCO DE CONTEÚDO:
1. [PISO]: Prioridade total. Reajuste do MEC para {year}/{next_year}. Piso em estados como RJ, SP, MG e capitais.
2. [CONCURSOS]: Apenas editais vigentes, autorizações de novos concursos para professores em {year}/{next_year}.
3. [BENEFICIOS]: FUNDEB, abonos, progressões de carreira, 13º, e gratificações específicas.
4. [REGRAS]: Mudanças em leis, BNCC, jornada de trabalho, planejamento de aulas.
5. [SINDICATO]: SEPE RJ, SINPRO e UPPES. Greves, assembleias e negociações de piso regional.

Use negrito (**texto**) apenas para dados vitais (valores R$, datas, nomes de cidades/sindicatos).
"#,
        today = today.format("%d/%m/%Y"),
    )
}
