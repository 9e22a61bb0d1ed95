//! Program builders
//!
//! Statements are appended in definition order; locals are plain
//! `ProgramValue::local` values of the method being built.

use codegraph_provenance::{
    Expr, FieldRef, InMemoryIcfg, InvokeExpr, Literal, MethodBody, MethodSignature, ProgramValue,
    Stmt,
};

pub const APP: &str = "com.app.Receiver";
pub const STRING: &str = "java.lang.String";
pub const STRING_BUILDER: &str = "java.lang.StringBuilder";
pub const CALENDAR: &str = "java.util.Calendar";
pub const DATE: &str = "java.util.Date";
pub const LOCATION: &str = "android.location.Location";
pub const SMS_MESSAGE: &str = "android.telephony.SmsMessage";
pub const INTENT: &str = "android.content.Intent";

/// Signature of a method declared on [`APP`]
pub fn app_method(name: &str, params: &[&str], ret: &str) -> MethodSignature {
    MethodSignature::of(APP, name, params, ret)
}

pub fn api(owner: &str, name: &str, params: &[&str], ret: &str) -> MethodSignature {
    MethodSignature::of(owner, name, params, ret)
}

pub fn static_call(method: MethodSignature, args: Vec<ProgramValue>) -> InvokeExpr {
    InvokeExpr::new_static(method, args)
}

pub fn virtual_call(method: MethodSignature, receiver: &ProgramValue, args: Vec<ProgramValue>) -> InvokeExpr {
    InvokeExpr::new_virtual(method, receiver.clone(), args)
}

pub fn string(value: &str) -> ProgramValue {
    ProgramValue::string(value)
}

pub fn long(value: i64) -> ProgramValue {
    ProgramValue::constant(Literal::Long(value))
}

/// Builder for one method body
#[derive(Debug)]
pub struct MethodBuilder {
    signature: MethodSignature,
    statements: Vec<Stmt>,
}

impl MethodBuilder {
    pub fn new(signature: MethodSignature) -> Self {
        Self {
            signature,
            statements: Vec::new(),
        }
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Local of this method
    pub fn local(&self, name: &str, ty: &str) -> ProgramValue {
        ProgramValue::local(&self.signature, name, ty)
    }

    /// Instance field of the method's own declaring type, read through `base`
    pub fn field(&self, base: &ProgramValue, name: &str, ty: &str) -> ProgramValue {
        ProgramValue::instance_field(
            base.clone(),
            FieldRef::new(self.signature.declaring_type.clone(), name, ty),
        )
    }

    /// Index the next statement will get
    pub fn next_index(&self) -> usize {
        self.statements.len()
    }

    /// `local := @this`
    pub fn this_ref(self, local: &ProgramValue) -> Self {
        let ty = self.signature.declaring_type.clone();
        self.assign(local, Expr::ThisRef { ty })
    }

    /// `local := @parameterN`
    pub fn param(self, local: &ProgramValue, index: usize) -> Self {
        let ty = local.ty().to_string();
        self.assign(local, Expr::ParameterRef { index, ty })
    }

    pub fn assign(mut self, target: &ProgramValue, rhs: Expr) -> Self {
        self.statements.push(Stmt::assign(target.clone(), rhs));
        self
    }

    /// `target = value`
    pub fn copy(self, target: &ProgramValue, value: ProgramValue) -> Self {
        self.assign(target, Expr::Use { value })
    }

    pub fn bin_op(self, target: &ProgramValue, op: &str, lhs: &ProgramValue, rhs: ProgramValue) -> Self {
        self.assign(
            target,
            Expr::BinOp {
                op: op.to_string(),
                lhs: lhs.clone(),
                rhs,
            },
        )
    }

    /// `target = (T) value`, `T` being the target's type
    pub fn cast(self, target: &ProgramValue, value: ProgramValue) -> Self {
        let ty = target.ty().to_string();
        self.assign(target, Expr::Cast { ty, value })
    }

    /// `target = invoke`
    pub fn call(self, target: &ProgramValue, invoke: InvokeExpr) -> Self {
        self.assign(target, Expr::Invoke { invoke })
    }

    /// Invocation statement, result discarded
    pub fn invoke(mut self, invoke: InvokeExpr) -> Self {
        self.statements.push(Stmt::invoke(invoke));
        self
    }

    /// `target = new T; target.<init>(args)`
    pub fn new_object(self, target: &ProgramValue, args: Vec<ProgramValue>) -> Self {
        let ty = target.ty().to_string();
        let params: Vec<String> = args.iter().map(|a| a.ty().to_string()).collect();
        let params: Vec<&str> = params.iter().map(String::as_str).collect();
        let init = InvokeExpr::new_special(MethodSignature::of(&ty, "<init>", &params, "void"), target.clone(), args);
        self.assign(target, Expr::New { ty }).invoke(init)
    }

    pub fn ret(mut self, value: Option<&ProgramValue>) -> Self {
        self.statements.push(Stmt::ret(value.cloned()));
        self
    }

    pub fn nop(mut self) -> Self {
        self.statements.push(Stmt::Nop);
        self
    }

    pub fn build(self) -> MethodBody {
        MethodBody::new(self.signature, self.statements)
    }
}

/// Builder for a whole program
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    methods: Vec<MethodBody>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: MethodBuilder) -> Self {
        self.methods.push(method.build());
        self
    }

    pub fn build(self) -> InMemoryIcfg {
        let mut icfg = InMemoryIcfg::new();
        for body in self.methods {
            icfg.add_method(body);
        }
        icfg
    }
}
