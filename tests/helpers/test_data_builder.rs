// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use obra_timeline::domain::types::{
    OrderState, ProcurementKind, PurchaseOrderState, StageState,
};
use obra_timeline::domain::{ProductionOrder, PurchaseOrder, StageInstance, StageTemplate};

/// 基准时刻: 2024-06-10 09:00
pub fn reference_now() -> NaiveDateTime {
    date(2024, 6, 10).and_hms_opt(9, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 标准 K-37 产线模板（故意乱序）
pub fn k37_templates() -> Vec<StageTemplate> {
    vec![
        template("T4", "Electrónica", Some(40), 10.0),
        template("T1", "Casco", Some(10), 30.0),
        template("T3", "Motorización", Some(30), 15.0),
        template("T2", "Cubierta", Some(20), 10.0),
        template("T5", "Entrega", Some(50), 0.0),
    ]
}

pub fn template(id: &str, nombre: &str, orden: Option<i64>, dias: f64) -> StageTemplate {
    StageTemplate {
        id: id.to_string(),
        linea_id: "L1".to_string(),
        nombre: nombre.to_string(),
        orden,
        dias_estimados: dias,
    }
}

// ==========================================
// ProductionOrder 构建器
// ==========================================

pub struct OrderBuilder {
    id: String,
    codigo: String,
    linea_id: String,
    estado: OrderState,
    fecha_inicio: Option<NaiveDate>,
}

impl OrderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            codigo: format!("K37-{}", id),
            linea_id: "L1".to_string(),
            estado: OrderState::Activa,
            fecha_inicio: None,
        }
    }

    pub fn start(mut self, fecha: NaiveDate) -> Self {
        self.fecha_inicio = Some(fecha);
        self
    }

    pub fn estado(mut self, estado: OrderState) -> Self {
        self.estado = estado;
        self
    }

    pub fn build(self) -> ProductionOrder {
        ProductionOrder {
            id: self.id,
            codigo: self.codigo,
            linea_id: self.linea_id,
            estado: self.estado,
            fecha_inicio: self.fecha_inicio,
            fecha_fin_estimada: None,
        }
    }
}

// ==========================================
// StageInstance 构建器
// ==========================================

pub struct StageBuilder {
    inner: StageInstance,
}

impl StageBuilder {
    pub fn new(id: &str, obra_id: &str, nombre: &str) -> Self {
        Self {
            inner: StageInstance {
                id: id.to_string(),
                obra_id: obra_id.to_string(),
                nombre: nombre.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn template(mut self, template_id: &str) -> Self {
        self.inner.linea_proceso_id = Some(template_id.to_string());
        self
    }

    pub fn procurement(mut self, lead_days: Option<i64>) -> Self {
        self.inner.genera_orden_compra = true;
        self.inner.orden_compra_dias_previo = lead_days;
        self
    }

    pub fn aviso(mut self) -> Self {
        self.inner.orden_compra_tipo = ProcurementKind::Aviso;
        self
    }

    pub fn amount(mut self, monto: f64) -> Self {
        self.inner.orden_compra_monto_estimado = monto;
        self
    }

    pub fn estado(mut self, estado: StageState) -> Self {
        self.inner.estado = estado;
        self
    }

    pub fn start(mut self, fecha: NaiveDate) -> Self {
        self.inner.fecha_inicio = Some(fecha);
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.inner.orden_compra_descripcion = Some(text.to_string());
        self
    }

    pub fn build(self) -> StageInstance {
        self.inner
    }
}

// ==========================================
// PurchaseOrder 构建器
// ==========================================

pub struct PurchaseOrderBuilder {
    inner: PurchaseOrder,
}

impl PurchaseOrderBuilder {
    pub fn new(id: &str, obra_id: &str) -> Self {
        Self {
            inner: PurchaseOrder {
                id: id.to_string(),
                obra_id: obra_id.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn for_stage_id(mut self, etapa_id: &str) -> Self {
        self.inner.etapa_id = Some(etapa_id.to_string());
        self
    }

    pub fn for_stage_name(mut self, nombre: &str) -> Self {
        self.inner.etapa_nombre = Some(nombre.to_string());
        self
    }

    pub fn estado(mut self, estado: PurchaseOrderState) -> Self {
        self.inner.estado = estado;
        self
    }

    pub fn limit(mut self, fecha: NaiveDate) -> Self {
        self.inner.fecha_limite_pedido = Some(fecha);
        self
    }

    pub fn build(self) -> PurchaseOrder {
        self.inner
    }
}
