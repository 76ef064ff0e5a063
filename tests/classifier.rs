use educafoco::markup::{segments, Segment};
use educafoco::{classify, Category, NewsResponse};

fn others_empty(sections: &educafoco::Sections, filled: &[Category]) {
    for (cat, lines) in sections.iter() {
        if !filled.contains(&cat) {
            assert!(lines.is_empty(), "{cat} should be empty, got {lines:?}");
        }
    }
}

#[test]
fn tagged_sections_land_in_their_buckets() {
    let sections = classify("[PISO]\nReajuste de 10%\n[CONCURSOS]\nNovo edital");
    assert_eq!(sections.get(Category::Piso), ["Reajuste de 10%"]);
    assert_eq!(sections.get(Category::Concursos), ["Novo edital"]);
    others_empty(&sections, &[Category::Piso, Category::Concursos]);
}

#[test]
fn lines_before_any_marker_go_to_general() {
    let sections = classify("Texto solto\n[REGRAS]\nNova lei");
    assert_eq!(sections.get(Category::Geral), ["Texto solto"]);
    assert_eq!(sections.get(Category::Regras), ["Nova lei"]);
    others_empty(&sections, &[Category::Geral, Category::Regras]);
}

#[test]
fn empty_input_yields_six_empty_buckets() {
    let sections = classify("");
    assert_eq!(sections.iter().count(), 6);
    assert!(sections.is_empty());
}

#[test]
fn unknown_tag_is_dropped_and_keeps_the_cursor() {
    let sections = classify("[OUTRO]\nLinha");
    assert_eq!(sections.get(Category::Geral), ["Linha"]);
    assert_eq!(sections.total_lines(), 1);

    let sections = classify("[SINDICATO]\nGreve\n[OUTRO]\nAssembleia");
    assert_eq!(sections.get(Category::Sindicato), ["Greve", "Assembleia"]);
}

#[test]
fn marker_lines_never_appear_in_output() {
    let text = "[PISO]\n[CONCURSOS]\n  [BENEFICIOS]  \n[REGRAS]\n[SINDICATO]\n";
    let sections = classify(text);
    assert!(sections.is_empty());
}

#[test]
fn assignment_follows_the_nearest_preceding_marker() {
    let text = "\
[BENEFICIOS]
- **FUNDEB**: repasse extra
- Abono em **dezembro**

[PISO]
- Piso de **R$ 4.867,77**
[BENEFICIOS]
- 13º antecipado";
    let sections = classify(text);
    assert_eq!(
        sections.get(Category::Beneficios),
        [
            "- **FUNDEB**: repasse extra",
            "- Abono em **dezembro**",
            "- 13º antecipado"
        ]
    );
    assert_eq!(sections.get(Category::Piso), ["- Piso de **R$ 4.867,77**"]);
}

#[test]
fn every_bucket_is_present_for_arbitrary_text() {
    for text in ["]]]", "[", "\n\n\n", "**", "[PISO", "PISO]", "a\r\nb"] {
        let sections = classify(text);
        let cats: Vec<Category> = sections.iter().map(|(c, _)| c).collect();
        assert_eq!(cats, Category::ALL.to_vec(), "input {text:?}");
    }
}

#[test]
fn response_sections_use_the_classifier() {
    let news = NewsResponse::new("[REGRAS]\nJornada de 1/3", Vec::new());
    assert_eq!(news.sections().get(Category::Regras), ["Jornada de 1/3"]);
}

#[test]
fn bold_markup_splits_into_segments() {
    assert_eq!(
        segments("**R$ 5.000** é o novo piso"),
        vec![Segment::Bold("R$ 5.000"), Segment::Plain(" é o novo piso")]
    );
}
