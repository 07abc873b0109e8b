// ==========================================
// 药品废弃分析系统 - 内置演示参考数据
// ==========================================
// 职责: 两家医院 8 个科室、30 种药品的演示参考表
// 数据: 科室权重对应“每日典型使用次数”,画像为各科室常用药 Top 10
// ==========================================

use crate::domain::reference::{
    Department, DepartmentWeight, Drug, DrugWeight, ReferenceData, ReferenceTables,
};

const DEPARTMENTS: &[(&str, &str)] = &[
    ("H1_ICU", "Karolinska – Intensive Care Unit"),
    ("H1_ED", "Karolinska – Emergency Department"),
    ("H1_SURG", "Karolinska – Surgery Department"),
    ("H1_IM", "Karolinska – Internal Medicine"),
    ("H2_ICU", "Capio S:t Görans – Intensive Care Unit"),
    ("H2_ED", "Capio S:t Görans – Emergency Department"),
    ("H2_SURG", "Capio S:t Görans – Surgery Department"),
    ("H2_IM", "Capio S:t Görans – Internal Medicine"),
];

const DRUGS: &[(&str, &str, f64)] = &[
    ("D001", "Propofol", 0.25),
    ("D002", "Midazolam", 0.2),
    ("D003", "Fentanyl", 0.3),
    ("D004", "Morphine", 0.2),
    ("D005", "Noradrenaline", 0.6),
    ("D006", "Adrenaline", 0.5),
    ("D007", "Heparin", 0.8),
    ("D008", "Insulin (IV)", 0.3),
    ("D009", "Paracetamol (IV)", 0.01),
    ("D010", "Ondansetron", 0.5),
    ("D011", "Metoclopramide", 0.5),
    ("D012", "Ceftriaxone", 0.3),
    ("D013", "Amoxicillin-Clavulanate (IV)", 0.2),
    ("D014", "Furosemide (IV)", 0.5),
    ("D015", "Pantoprazole (IV)", 0.2),
    ("D016", "Metronidazole (IV)", 0.015),
    ("D017", "Dexamethasone (IV)", 1.0),
    ("D018", "Sevoflurane (Anesthetic)", 0.15),
    ("D019", "Rocuronium", 0.4),
    ("D020", "Sugammadex", 1.5),
    ("D021", "Salbutamol (Nebules)", 0.08),
    ("D022", "Ketorolac (IV)", 1.0),
    ("D023", "Cefazolin (IV)", 0.25),
    ("D024", "Vancomycin (IV)", 0.3),
    ("D025", "Meropenem (IV)", 0.25),
    ("D026", "Omeprazole (IV)", 0.1),
    ("D027", "Enoxaparin", 0.25),
    ("D028", "Dopamine (IV)", 0.25),
    ("D029", "Amiodarone (IV)", 0.25),
    ("D030", "Lidocaine (IV)", 0.15),
];

const VIAL_VOLUMES_ML: &[(&str, f64)] = &[
    ("D001", 20.0),
    ("D002", 10.0),
    ("D003", 10.0),
    ("D004", 10.0),
    ("D005", 10.0),
    ("D006", 10.0),
    ("D007", 5.0),
    ("D008", 10.0),
    ("D009", 100.0),
    ("D010", 4.0),
    ("D011", 2.0),
    ("D012", 10.0),
    ("D013", 20.0),
    ("D014", 2.0),
    ("D015", 10.0),
    ("D016", 100.0),
    ("D017", 1.0),
    ("D018", 250.0),
    ("D019", 10.0),
    ("D020", 2.0),
    ("D021", 2.5),
    ("D022", 1.0),
    ("D023", 8.0),
    ("D024", 50.0),
    ("D025", 20.0),
    ("D026", 40.0),
    ("D027", 40.0),
    ("D028", 10.0),
    ("D029", 3.0),
    ("D030", 20.0),
];

const DEPARTMENT_WEIGHTS: &[(&str, f64)] = &[
    ("H1_ICU", 72.0),
    ("H2_ICU", 56.5),
    ("H1_ED", 54.0),
    ("H1_SURG", 48.5),
    ("H1_IM", 45.5),
    ("H2_ED", 42.5),
    ("H2_SURG", 39.0),
    ("H2_IM", 36.5),
];

const DEPARTMENT_DRUG_PROFILES: &[(&str, &[(&str, f64)])] = &[
    (
        "H1_ED",
        &[
            ("D009", 4.0),
            ("D012", 4.0),
            ("D004", 3.0),
            ("D010", 3.0),
            ("D011", 3.0),
            ("D013", 3.0),
            ("D014", 3.0),
            ("D022", 3.0),
            ("D001", 2.0),
            ("D021", 2.0),
        ],
    ),
    (
        "H1_ICU",
        &[
            ("D001", 6.0),
            ("D005", 6.0),
            ("D006", 5.0),
            ("D002", 5.0),
            ("D003", 4.0),
            ("D007", 4.0),
            ("D004", 3.0),
            ("D028", 3.0),
            ("D024", 3.0),
            ("D025", 2.0),
        ],
    ),
    (
        "H1_SURG",
        &[
            ("D018", 5.0),
            ("D001", 4.0),
            ("D022", 4.0),
            ("D019", 3.5),
            ("D020", 3.0),
            ("D030", 3.0),
            ("D004", 2.5),
            ("D010", 2.0),
            ("D023", 2.0),
            ("D017", 2.0),
        ],
    ),
    (
        "H1_IM",
        &[
            ("D009", 3.0),
            ("D014", 3.0),
            ("D015", 3.0),
            ("D012", 2.5),
            ("D013", 2.5),
            ("D026", 2.0),
            ("D027", 2.0),
            ("D011", 2.0),
            ("D008", 2.0),
            ("D016", 1.5),
        ],
    ),
    (
        "H2_ED",
        &[
            ("D009", 3.0),
            ("D012", 3.0),
            ("D004", 2.5),
            ("D010", 2.5),
            ("D011", 2.5),
            ("D013", 2.5),
            ("D014", 2.5),
            ("D022", 2.0),
            ("D001", 1.5),
            ("D021", 1.5),
        ],
    ),
    (
        "H2_ICU",
        &[
            ("D001", 5.0),
            ("D005", 5.0),
            ("D006", 4.0),
            ("D002", 4.0),
            ("D003", 3.5),
            ("D007", 3.5),
            ("D004", 2.5),
            ("D028", 2.5),
            ("D024", 2.5),
            ("D025", 2.0),
        ],
    ),
    (
        "H2_SURG",
        &[
            ("D018", 4.0),
            ("D001", 3.0),
            ("D022", 3.0),
            ("D019", 2.5),
            ("D020", 2.0),
            ("D030", 2.0),
            ("D004", 2.0),
            ("D010", 1.5),
            ("D023", 1.5),
            ("D017", 1.5),
        ],
    ),
    (
        "H2_IM",
        &[
            ("D009", 2.5),
            ("D014", 2.5),
            ("D015", 2.5),
            ("D012", 2.0),
            ("D013", 2.0),
            ("D026", 1.8),
            ("D027", 1.8),
            ("D011", 1.8),
            ("D008", 1.6),
            ("D016", 1.3),
        ],
    ),
];

/// 构建演示参考表
pub fn demo_reference_tables() -> ReferenceTables {
    ReferenceTables {
        departments: DEPARTMENTS
            .iter()
            .map(|(id, name)| Department {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect(),
        drugs: DRUGS
            .iter()
            .map(|(id, name, cost)| Drug {
                id: id.to_string(),
                name: name.to_string(),
                cost_per_ml: *cost,
            })
            .collect(),
        vial_volumes_ml: VIAL_VOLUMES_ML
            .iter()
            .map(|(id, ml)| (id.to_string(), *ml))
            .collect(),
        department_weights: DEPARTMENT_WEIGHTS
            .iter()
            .map(|(id, weight)| DepartmentWeight {
                department_id: id.to_string(),
                weight: *weight,
            })
            .collect(),
        department_drug_profiles: DEPARTMENT_DRUG_PROFILES
            .iter()
            .map(|(dept, profile)| {
                let weights: Vec<DrugWeight> = profile
                    .iter()
                    .map(|(drug_id, weight)| DrugWeight {
                        drug_id: drug_id.to_string(),
                        weight: *weight,
                    })
                    .collect();
                (dept.to_string(), weights)
            })
            .collect(),
    }
}

/// 演示参考数据（已建立索引）
pub fn demo_reference_data() -> ReferenceData {
    ReferenceData::build(demo_reference_tables())
}
