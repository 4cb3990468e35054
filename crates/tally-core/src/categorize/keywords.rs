//! Category keyword table
//!
//! Keywords are lowercase substrings matched against the lowercased
//! description. Several keywords appear under more than one category; the
//! scan order resolves those overlaps, so entries must stay in `Category`
//! declaration order.

use crate::models::Category;

/// Keywords per category. `Other` has none and is the fallback.
pub static CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "restaurante",
            "lanchonete",
            "pizza",
            "hambúrguer",
            "comida",
            "padaria",
            "açougue",
            "supermercado",
            "mercado",
            "feira",
            "delivery",
            "uber eats",
            "ifood",
            "rappi",
            "café",
            "bar",
            "churrascaria",
            "sushi",
            "pão",
            "alimento",
            "grocery",
        ],
    ),
    (
        Category::Transportation,
        &[
            "uber",
            "taxi",
            "ônibus",
            "metrô",
            "trem",
            "passagem",
            "combustível",
            "gasolina",
            "diesel",
            "estacionamento",
            "pedágio",
            "transporte",
            "viagem",
            "passagem aérea",
            "lyft",
            "bolt",
            "99",
            "car rental",
            "aluguel carro",
        ],
    ),
    (
        Category::Health,
        &[
            "farmácia",
            "médico",
            "dentista",
            "hospital",
            "clínica",
            "remédio",
            "medicamento",
            "consulta",
            "cirurgia",
            "exame",
            "academia",
            "musculação",
            "yoga",
            "fisioterapia",
            "psicólogo",
            "saúde",
            "healthcare",
            "pharmacy",
            "doctor",
        ],
    ),
    (
        Category::Education,
        &[
            "escola",
            "universidade",
            "curso",
            "educação",
            "aula",
            "livro",
            "material escolar",
            "faculdade",
            "treinamento",
            "certificado",
            "workshop",
            "seminar",
            "learning",
            "tutor",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "cinema",
            "filme",
            "teatro",
            "show",
            "música",
            "concerto",
            "jogo",
            "game",
            "streaming",
            "netflix",
            "spotify",
            "prime",
            "diversão",
            "lazer",
            "parque",
            "passeio",
            "viagem",
            "disney",
            "ingresso",
            "ticket",
        ],
    ),
    (
        Category::Subscriptions,
        &[
            "assinatura",
            "subscription",
            "netflix",
            "spotify",
            "prime",
            "adobe",
            "microsoft",
            "apple",
            "google",
            "cloud",
            "hosting",
            "software",
            "app",
            "serviço",
            "mensal",
            "anual",
        ],
    ),
    (
        Category::Utilities,
        &[
            "água",
            "luz",
            "energia",
            "gás",
            "internet",
            "telefone",
            "conta",
            "fatura",
            "utilidade",
            "eletricidade",
            "utility",
            "electric",
            "water",
            "gas",
            "internet provider",
        ],
    ),
    (
        Category::Insurance,
        &[
            "seguro",
            "insurance",
            "apólice",
            "proteção",
            "cobertura",
            "saúde",
            "vida",
            "carro",
            "casa",
            "responsabilidade",
        ],
    ),
    (
        Category::Salary,
        &[
            "salário",
            "salary",
            "pagamento",
            "payment",
            "depósito",
            "vencimento",
            "remuneração",
            "ganho",
            "income",
            "earnings",
        ],
    ),
    (
        Category::Investment,
        &[
            "investimento",
            "ação",
            "stock",
            "fundo",
            "fund",
            "bitcoin",
            "cripto",
            "bolsa",
            "tesouro",
            "renda fixa",
            "aplicação",
            "broker",
            "corretora",
            "dividendo",
        ],
    ),
    (Category::Other, &[]),
];

/// Keywords registered for a category
pub fn keywords_for(category: Category) -> &'static [&'static str] {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, kw)| *kw)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_category_order() {
        let order: Vec<Category> = CATEGORY_KEYWORDS.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for (_, keywords) in CATEGORY_KEYWORDS {
            for kw in *keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword not lowercase: {}", kw);
            }
        }
    }

    #[test]
    fn test_overlapping_keywords_are_kept() {
        assert!(keywords_for(Category::Entertainment).contains(&"netflix"));
        assert!(keywords_for(Category::Subscriptions).contains(&"netflix"));
        assert!(keywords_for(Category::Health).contains(&"saúde"));
        assert!(keywords_for(Category::Insurance).contains(&"saúde"));
        assert!(keywords_for(Category::Other).is_empty());
    }
}
