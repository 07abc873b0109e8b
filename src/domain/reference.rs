// ==========================================
// 药品废弃分析系统 - 参考数据领域模型
// ==========================================
// 职责: 科室、药品、瓶装容量、科室用量权重、科室药品画像
// 红线: 进程启动时加载一次,之后只读; 查询缺失时返回定义好的默认值
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

// ==========================================
// 参考实体
// ==========================================

/// 科室
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// 药品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drug {
    pub id: String,
    pub name: String,
    pub cost_per_ml: f64, // 单位容量成本 (货币/mL, >= 0)
}

/// 科室用量权重（驱动科室抽样频率）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWeight {
    pub department_id: String,
    pub weight: f64,
}

/// 科室内药品用量权重（驱动药品抽样频率）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugWeight {
    pub drug_id: String,
    pub weight: f64,
}

// ==========================================
// 参考数据校验错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceDataError {
    #[error("参考表为空: {0}")]
    EmptyTable(&'static str),

    #[error("重复的ID (table={table}): {id}")]
    DuplicateId { table: &'static str, id: String },

    #[error("数值非法 (table={table}, id={id}): {value}")]
    InvalidValue {
        table: &'static str,
        id: String,
        value: f64,
    },
}

// ==========================================
// ReferenceTables - 参考数据原始表（序列化格式）
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub departments: Vec<Department>,
    pub drugs: Vec<Drug>,
    #[serde(default)]
    pub vial_volumes_ml: BTreeMap<String, f64>,
    pub department_weights: Vec<DepartmentWeight>,
    #[serde(default)]
    pub department_drug_profiles: BTreeMap<String, Vec<DrugWeight>>,
}

impl ReferenceTables {
    /// 校验参考表
    ///
    /// 规则:
    /// - 科室/药品/科室权重不可为空
    /// - 科室、药品ID唯一
    /// - 成本 >= 0, 瓶装容量 > 0, 权重 >= 0 (均需有限值)
    ///
    /// 表内悬空引用（如画像中引用未知药品）允许存在
    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        if self.departments.is_empty() {
            return Err(ReferenceDataError::EmptyTable("departments"));
        }
        if self.drugs.is_empty() {
            return Err(ReferenceDataError::EmptyTable("drugs"));
        }
        if self.department_weights.is_empty() {
            return Err(ReferenceDataError::EmptyTable("department_weights"));
        }

        let mut seen = HashSet::new();
        for dept in &self.departments {
            if !seen.insert(dept.id.as_str()) {
                return Err(ReferenceDataError::DuplicateId {
                    table: "departments",
                    id: dept.id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for drug in &self.drugs {
            if !seen.insert(drug.id.as_str()) {
                return Err(ReferenceDataError::DuplicateId {
                    table: "drugs",
                    id: drug.id.clone(),
                });
            }
            if !drug.cost_per_ml.is_finite() || drug.cost_per_ml < 0.0 {
                return Err(ReferenceDataError::InvalidValue {
                    table: "drugs",
                    id: drug.id.clone(),
                    value: drug.cost_per_ml,
                });
            }
        }

        for (drug_id, volume) in &self.vial_volumes_ml {
            if !volume.is_finite() || *volume <= 0.0 {
                return Err(ReferenceDataError::InvalidValue {
                    table: "vial_volumes_ml",
                    id: drug_id.clone(),
                    value: *volume,
                });
            }
        }

        for w in &self.department_weights {
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(ReferenceDataError::InvalidValue {
                    table: "department_weights",
                    id: w.department_id.clone(),
                    value: w.weight,
                });
            }
        }

        for (dept_id, profile) in &self.department_drug_profiles {
            for w in profile {
                if !w.weight.is_finite() || w.weight < 0.0 {
                    return Err(ReferenceDataError::InvalidValue {
                        table: "department_drug_profiles",
                        id: format!("{}/{}", dept_id, w.drug_id),
                        value: w.weight,
                    });
                }
            }
        }

        Ok(())
    }
}

// ==========================================
// ReferenceData - 已校验并建立索引的参考数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ReferenceTables", into = "ReferenceTables")]
pub struct ReferenceData {
    tables: ReferenceTables,
    department_index: HashMap<String, usize>,
    drug_index: HashMap<String, usize>,
    // 科室无画像时的兜底: 全药品目录等权
    uniform_drug_weights: Vec<DrugWeight>,
}

impl ReferenceData {
    /// 校验并构建参考数据
    pub fn new(tables: ReferenceTables) -> Result<Self, ReferenceDataError> {
        tables.validate()?;
        Ok(Self::build(tables))
    }

    /// 仅建立索引（内置数据使用,由单测保证合法）
    pub(crate) fn build(tables: ReferenceTables) -> Self {
        let department_index = tables
            .departments
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        let drug_index = tables
            .drugs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        let uniform_drug_weights = tables
            .drugs
            .iter()
            .map(|d| DrugWeight {
                drug_id: d.id.clone(),
                weight: 1.0,
            })
            .collect();

        Self {
            tables,
            department_index,
            drug_index,
            uniform_drug_weights,
        }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn departments(&self) -> &[Department] {
        &self.tables.departments
    }

    pub fn drugs(&self) -> &[Drug] {
        &self.tables.drugs
    }

    pub fn department_weights(&self) -> &[DepartmentWeight] {
        &self.tables.department_weights
    }

    // ==========================================
    // 带默认值的查询
    // ==========================================

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.department_index
            .get(id)
            .map(|&i| &self.tables.departments[i])
    }

    pub fn drug(&self, id: &str) -> Option<&Drug> {
        self.drug_index.get(id).map(|&i| &self.tables.drugs[i])
    }

    /// 科室展示名,未知科室返回原始ID
    pub fn department_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.department(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    /// 药品展示名,未知药品返回原始ID
    pub fn drug_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.drug(id).map(|d| d.name.as_str()).unwrap_or(id)
    }

    /// 单位容量成本,未知药品返回 0
    pub fn cost_rate(&self, drug_id: &str) -> f64 {
        self.drug(drug_id).map(|d| d.cost_per_ml).unwrap_or(0.0)
    }

    pub fn vial_volume_ml(&self, drug_id: &str) -> Option<f64> {
        self.tables.vial_volumes_ml.get(drug_id).copied()
    }

    /// 科室药品画像,无画像时返回全目录等权列表
    pub fn drug_profile(&self, department_id: &str) -> &[DrugWeight] {
        self.tables
            .department_drug_profiles
            .get(department_id)
            .map(|p| p.as_slice())
            .filter(|p| !p.is_empty())
            .unwrap_or(self.uniform_drug_weights.as_slice())
    }

    pub fn has_drug_profile(&self, department_id: &str) -> bool {
        self.tables
            .department_drug_profiles
            .get(department_id)
            .map_or(false, |p| !p.is_empty())
    }
}

impl TryFrom<ReferenceTables> for ReferenceData {
    type Error = ReferenceDataError;

    fn try_from(tables: ReferenceTables) -> Result<Self, Self::Error> {
        ReferenceData::new(tables)
    }
}

impl From<ReferenceData> for ReferenceTables {
    fn from(data: ReferenceData) -> Self {
        data.tables
    }
}
