//! The BR-251 truck driver rest-stop survey.
//!
//! Eleven core questions, a section intro, then one importance question per
//! service. Question 8 reveals a checklist of services when answered "Sim".

use crate::{FollowUp, Question, QuestionId, Questionnaire, ScreenCopy};

/// Services offered at a rest stop. Order drives both the follow-up checklist
/// and the generated importance questions.
pub const SERVICES: [&str; 12] = [
    "Cabeleireiro",
    "Restaurante",
    "Banho",
    "Café",
    "Conserto de Borracharia",
    "Mecânica",
    "Dormitório",
    "Lavanderia",
    "Área de lazer",
    "Academia / Exercícios",
    "Wi-Fi gratuito",
    "Estacionamento seguro",
];

/// Importance scale, most to least important.
pub const PREFERENCES: [&str; 5] = [
    "Muito Importante",
    "Importante",
    "Neutro",
    "Pouco Importante",
    "Não é Importante",
];

/// The answer to question 8 that reveals the missed-services checklist.
pub const AFFIRMATIVE: &str = "Sim";

pub const AGE: QuestionId = QuestionId(1);
pub const GENDER: QuestionId = QuestionId(2);
pub const EXPERIENCE: QuestionId = QuestionId(3);
pub const TRUCK_TYPE: QuestionId = QuestionId(4);
pub const FREQUENCY: QuestionId = QuestionId(5);
pub const STOPS_PER_DAY: QuestionId = QuestionId(6);
pub const STOP_DURATION: QuestionId = QuestionId(7);
pub const MISSED_SERVICES: QuestionId = QuestionId(8);
pub const SAFETY: QuestionId = QuestionId(9);
pub const CLEANLINESS: QuestionId = QuestionId(10);
pub const FOOD_QUALITY: QuestionId = QuestionId(11);

const SECTION_INTRO: &str = "Agora, por favor, indique a importância de cada um dos seguintes \
     serviços para sua experiência como caminhoneiro.";

/// The fixed core questions, in order.
pub fn core_questions() -> Vec<Question> {
    vec![
        Question::core(
            AGE,
            "1. Qual a sua idade?",
            [
                "Menos de 30 anos",
                "30 a 44 anos",
                "45 a 59 anos",
                "60 anos ou mais",
            ],
        ),
        Question::core(
            GENDER,
            "2. Qual o seu gênero?",
            ["Masculino", "Feminino", "Outro", "Prefiro não dizer"],
        ),
        Question::core(
            EXPERIENCE,
            "3. Tempo de experiência como caminhoneiro",
            ["Menos de 1 ano", "1 a 5 anos", "6 a 10 anos", "Mais de 10 anos"],
        ),
        Question::core(
            TRUCK_TYPE,
            "4. Tipo de caminhão que você dirige",
            ["Truck", "Carreta", "Bitrem", "Outros"],
        ),
        Question::core(
            FREQUENCY,
            "5. Com que frequência você trafega pela BR-251 ou trecho próximo a Grão Mogol?",
            [
                "Diariamente",
                "Semanalmente",
                "Quinzenalmente",
                "Mensalmente",
                "Raramente",
            ],
        ),
        Question::core(
            STOPS_PER_DAY,
            "6. Quantas vezes por dia costuma parar para descanso durante o trajeto?",
            ["Nenhuma", "1 vez", "2 vezes", "3 vezes ou mais"],
        ),
        Question::core(
            STOP_DURATION,
            "7. Em média, quanto tempo você permanece parado nesses pontos de apoio?",
            [
                "Menos de 30 minutos",
                "Entre 30 minutos e 1 hora",
                "Entre 1 e 2 horas",
                "Mais de 2 horas",
            ],
        ),
        Question::core(
            MISSED_SERVICES,
            "8. Você já procurou algum serviço em ponto de apoio e não encontrou?",
            [AFFIRMATIVE, "Não"],
        )
        .with_follow_up(FollowUp::new(
            "Se respondeu sim, qual serviço você não encontrou?",
            AFFIRMATIVE,
            SERVICES,
        )),
        Question::core(
            SAFETY,
            "9. Como você avalia a segurança nos locais de parada atualmente disponíveis para caminhoneiros?",
            ["Muito seguro", "Seguro", "Neutro", "Inseguro", "Muito inseguro"],
        ),
        Question::core(
            CLEANLINESS,
            "10. Como você avalia a limpeza e a higiene nos locais de parada atualmente disponíveis para caminhoneiros?",
            [
                "Muito Limpo e Higiênico",
                "Limpo e Higiênico",
                "Neutro",
                "Sujo",
                "Muito Sujo e Não Higiênico",
            ],
        ),
        Question::core(
            FOOD_QUALITY,
            "11. Como você avalia a qualidade da comida oferecida nos restaurantes dos pontos de parada?",
            ["Muito Boa", "Boa", "Neutra", "Ruim", "Muito Ruim"],
        ),
    ]
}

/// One importance question per service, ids starting at `QuestionId::SERVICE_BASE`.
pub fn service_questions() -> Vec<Question> {
    SERVICES
        .iter()
        .enumerate()
        .map(|(index, service)| Question::service(index, *service, PREFERENCES))
        .collect()
}

/// Portuguese copy for every screen of the survey.
pub fn copy() -> ScreenCopy {
    ScreenCopy {
        welcome_title: "Pesquisa com Caminhoneiros da BR-251".to_string(),
        welcome_body: "Esta pesquisa faz parte de um estudo acadêmico de mestrado e tem como \
                       objetivo entender as principais necessidades dos caminhoneiros na rodovia \
                       BR-251, para o desenvolvimento de soluções e melhorias. Sua participação é \
                       voluntária, anônima e muito importante."
            .to_string(),
        start_label: "Aceitar e Iniciar".to_string(),
        section_intro_title: "Serviços Prioritários".to_string(),
        section_intro_start_label: "Começar".to_string(),
        back_label: "Voltar".to_string(),
        next_label: "Próximo".to_string(),
        finish_label: "Finalizar".to_string(),
        sending_label: "Enviando...".to_string(),
        unanswered_title: "Atenção".to_string(),
        unanswered_message: "Por favor, responda a pergunta antes de continuar.".to_string(),
        dismiss_label: "Fechar".to_string(),
        follow_up_required_message: "Por favor, selecione pelo menos um serviço.".to_string(),
        thank_you_title: "Obrigado pela sua participação!".to_string(),
        thank_you_body: "Suas respostas foram registradas com sucesso. Agradecemos muito sua \
                         colaboração!"
            .to_string(),
    }
}

/// The complete survey: core questions, section intro, service questions.
pub fn questionnaire() -> Questionnaire {
    let mut questions = core_questions();
    questions.push(Question::section_intro(SECTION_INTRO));
    questions.extend(service_questions());

    Questionnaire::new("Pesquisa com Caminhoneiros da BR-251", questions).with_copy(copy())
}
